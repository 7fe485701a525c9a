use crate::error::XTypeError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "degree_F")]
    DegreeF,
    #[serde(rename = "degree_C")]
    DegreeC,
    #[serde(rename = "degree_K")]
    DegreeK,
    #[serde(rename = "second")]
    Second,
    #[serde(rename = "minute")]
    Minute,
    #[serde(rename = "hour")]
    Hour,
    #[serde(rename = "day")]
    Day,
}

impl Unit {
    pub fn name(self) -> &'static str {
        match self {
            Unit::DegreeF => "degree_F",
            Unit::DegreeC => "degree_C",
            Unit::DegreeK => "degree_K",
            Unit::Second => "second",
            Unit::Minute => "minute",
            Unit::Hour => "hour",
            Unit::Day => "day",
        }
    }

    fn seconds(self) -> Option<f64> {
        match self {
            Unit::Second => Some(1.0),
            Unit::Minute => Some(60.0),
            Unit::Hour => Some(3600.0),
            Unit::Day => Some(86400.0),
            _ => None,
        }
    }

    fn is_temperature(self) -> bool {
        matches!(self, Unit::DegreeF | Unit::DegreeC | Unit::DegreeK)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitGroup {
    #[serde(rename = "group_temperature")]
    Temperature,
    #[serde(rename = "group_interval")]
    Interval,
    /// Accumulated elapsed time, e.g. chill hours.
    #[serde(rename = "group_elapsed")]
    Elapsed,
}

/// Unit system tag carried by every record (`usUnits`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum UnitSystem {
    Us,
    Metric,
    MetricWx,
}

impl TryFrom<u8> for UnitSystem {
    type Error = XTypeError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(UnitSystem::Us),
            16 => Ok(UnitSystem::Metric),
            17 => Ok(UnitSystem::MetricWx),
            other => Err(XTypeError::UnknownUnitSystem(other)),
        }
    }
}

impl From<UnitSystem> for u8 {
    fn from(system: UnitSystem) -> u8 {
        match system {
            UnitSystem::Us => 1,
            UnitSystem::Metric => 16,
            UnitSystem::MetricWx => 17,
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UnitSystem::Us => "US",
            UnitSystem::Metric => "METRIC",
            UnitSystem::MetricWx => "METRICWX",
        };
        f.write_str(name)
    }
}

impl UnitSystem {
    /// Standard unit of a unit group in this system.
    pub fn unit_for(self, group: UnitGroup) -> Unit {
        match (self, group) {
            (UnitSystem::Us, UnitGroup::Temperature) => Unit::DegreeF,
            (_, UnitGroup::Temperature) => Unit::DegreeC,
            (_, UnitGroup::Interval) => Unit::Minute,
            (_, UnitGroup::Elapsed) => Unit::Hour,
        }
    }
}

/// A value tagged with its unit and unit group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueTuple {
    pub value: f64,
    pub unit: Unit,
    pub group: UnitGroup,
}

impl ValueTuple {
    pub fn new(value: f64, unit: Unit, group: UnitGroup) -> Self {
        Self { value, unit, group }
    }
}

impl fmt::Display for ValueTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// Unit group an observation type belongs to.
pub fn obs_group(obs_type: &str) -> Option<UnitGroup> {
    match obs_type {
        "outTemp" | "inTemp" | "dewpoint" | "windchill" | "heatindex" => {
            Some(UnitGroup::Temperature)
        }
        "interval" => Some(UnitGroup::Interval),
        "chillTime" | "chillHours" => Some(UnitGroup::Elapsed),
        _ => None,
    }
}

/// Look up the unit and group an observation type is stored in for a unit system.
pub fn standard_unit_type(
    system: UnitSystem,
    obs_type: &str,
) -> Result<(Unit, UnitGroup), XTypeError> {
    let group = obs_group(obs_type).ok_or_else(|| XTypeError::UnknownUnit {
        obs_type: obs_type.to_string(),
        system: system.to_string(),
    })?;
    Ok((system.unit_for(group), group))
}

fn to_kelvin(value: f64, unit: Unit) -> f64 {
    match unit {
        Unit::DegreeF => (value - 32.0) * 5.0 / 9.0 + 273.15,
        Unit::DegreeC => value + 273.15,
        _ => value,
    }
}

fn from_kelvin(value: f64, unit: Unit) -> f64 {
    match unit {
        Unit::DegreeF => (value - 273.15) * 9.0 / 5.0 + 32.0,
        Unit::DegreeC => value - 273.15,
        _ => value,
    }
}

/// Convert a value to another unit of the same dimension. The group is kept.
pub fn convert(vt: ValueTuple, to: Unit) -> Result<ValueTuple, XTypeError> {
    if vt.unit == to {
        return Ok(vt);
    }

    let value = if vt.unit.is_temperature() && to.is_temperature() {
        from_kelvin(to_kelvin(vt.value, vt.unit), to)
    } else if let (Some(from_secs), Some(to_secs)) = (vt.unit.seconds(), to.seconds()) {
        vt.value * from_secs / to_secs
    } else {
        return Err(XTypeError::IncompatibleUnits {
            from: vt.unit.to_string(),
            to: to.to_string(),
        });
    };

    Ok(ValueTuple::new(value, to, vt.group))
}

/// Convert a value to the standard unit of its group in `system`.
pub fn convert_std(vt: ValueTuple, system: UnitSystem) -> Result<ValueTuple, XTypeError> {
    convert(vt, system.unit_for(vt.group))
}
