//! Chill time: hours spent in the temperature bands that count toward
//! breaking plant dormancy.

use crate::error::XTypeError;
use crate::record::{Record, RecordSource, TimeSpan};
use crate::units::{self, Unit, UnitGroup, ValueTuple};
use crate::xtypes::XType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Observation types this provider answers to.
pub const OBS_TYPES: [&str; 2] = ["chillTime", "chillHours"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Every hour below 45°F counts.
    #[default]
    Simple,
    /// Weighted bands, with warm hours subtracting.
    Utah,
    /// Only hours strictly between 32°F and 45°F count.
    Modified,
}

impl Algorithm {
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Simple => "simple",
            Algorithm::Utah => "utah",
            Algorithm::Modified => "modified",
        }
    }

    /// Chill hours accrued over `interval_h` hours at `temp_f` °F.
    pub fn chill_hours(self, temp_f: f64, interval_h: f64) -> f64 {
        match self {
            Algorithm::Simple => {
                if temp_f < 45.0 {
                    interval_h
                } else {
                    0.0
                }
            }
            Algorithm::Utah => match temp_f {
                t if t <= 34.0 => 0.0,
                t if t <= 36.0 => 0.5 * interval_h,
                t if t <= 48.0 => interval_h,
                t if t <= 54.0 => 0.5 * interval_h,
                t if t <= 60.0 => 0.0,
                t if t <= 65.0 => -0.5 * interval_h,
                t if t > 65.0 => -interval_h,
                // NaN
                _ => 0.0,
            },
            Algorithm::Modified => {
                if 32.0 < temp_f && temp_f < 45.0 {
                    interval_h
                } else {
                    0.0
                }
            }
        }
    }
}

impl FromStr for Algorithm {
    type Err = XTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simple" => Ok(Algorithm::Simple),
            "utah" => Ok(Algorithm::Utah),
            "modified" => Ok(Algorithm::Modified),
            _ => Err(XTypeError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Metric provider for `chillTime` / `chillHours`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChillTime {
    algorithm: Algorithm,
}

impl ChillTime {
    /// Fails immediately on an unrecognized algorithm name.
    pub fn new(algorithm: &str) -> Result<Self, XTypeError> {
        Ok(Self::with_algorithm(algorithm.parse()?))
    }

    pub fn with_algorithm(algorithm: Algorithm) -> Self {
        Self { algorithm }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn handles(obs_type: &str) -> bool {
        OBS_TYPES.contains(&obs_type)
    }

    /// Chill hours contributed by one record.
    fn contribution(&self, obs_type: &str, record: &Record) -> Result<f64, XTypeError> {
        let (Some(out_temp), Some(interval)) = (record.out_temp, record.interval) else {
            return Err(XTypeError::CannotCalculate(obs_type.to_string()));
        };

        let (unit, group) = units::standard_unit_type(record.us_units, "outTemp")?;
        let temp_f = units::convert(ValueTuple::new(out_temp, unit, group), Unit::DegreeF)?;

        let (unit, group) = units::standard_unit_type(record.us_units, "interval")?;
        let interval_h = units::convert(ValueTuple::new(interval, unit, group), Unit::Hour)?;

        Ok(self.algorithm.chill_hours(temp_f.value, interval_h.value))
    }
}

fn hours(value: f64) -> ValueTuple {
    ValueTuple::new(value, Unit::Hour, UnitGroup::Elapsed)
}

impl XType for ChillTime {
    fn get_scalar(&self, obs_type: &str, record: &Record) -> Result<ValueTuple, XTypeError> {
        if !Self::handles(obs_type) {
            return Err(XTypeError::UnknownType(obs_type.to_string()));
        }

        let chill = self.contribution(obs_type, record)?;
        debug!(algorithm = %self.algorithm, chill, "Scalar chill hours");
        Ok(hours(chill))
    }

    fn get_aggregate(
        &self,
        obs_type: &str,
        span: &TimeSpan,
        aggregate_type: &str,
        source: &dyn RecordSource,
    ) -> Result<ValueTuple, XTypeError> {
        if !Self::handles(obs_type) {
            return Err(XTypeError::UnknownType(obs_type.to_string()));
        }
        if aggregate_type != "sum" {
            return Err(XTypeError::UnknownAggregation(aggregate_type.to_string()));
        }

        let mut total = 0.0;
        let mut count = 0usize;
        for record in source.records(span)? {
            let record = record?;
            count += 1;
            // Gaps in the temperature series add nothing.
            if record.out_temp.is_none() {
                continue;
            }
            total += self.contribution(obs_type, &record)?;
        }

        debug!(algorithm = %self.algorithm, records = count, total, "Aggregate chill hours");
        Ok(hours(total))
    }
}
