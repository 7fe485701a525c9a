use chill_time::config::{ChillTimeConfig, Config};
use chill_time::error::XTypeError;
use chill_time::record::{MemorySource, Record, TimeSpan};
use chill_time::service::ChillTimeService;
use chill_time::units::{Unit, UnitGroup, UnitSystem, ValueTuple};
use chill_time::xtypes::{XType, XTypeRegistry};
use chrono::{Duration, TimeZone, Utc};
use std::sync::Arc;

fn config(algorithm: &str) -> Config {
    Config {
        chill_time: ChillTimeConfig {
            algorithm: algorithm.to_string(),
        },
    }
}

/// Answers `outTemp` with the record's own value
struct OutTempEcho;

impl XType for OutTempEcho {
    fn get_scalar(&self, obs_type: &str, record: &Record) -> Result<ValueTuple, XTypeError> {
        if obs_type != "outTemp" {
            return Err(XTypeError::UnknownType(obs_type.to_string()));
        }
        let value = record
            .out_temp
            .ok_or_else(|| XTypeError::CannotCalculate(obs_type.to_string()))?;
        Ok(ValueTuple::new(value, Unit::DegreeF, UnitGroup::Temperature))
    }
}

#[test]
fn test_service_registers_and_unregisters() {
    let mut registry = XTypeRegistry::new();
    let service = ChillTimeService::new(&mut registry, &Config::default()).unwrap();
    assert_eq!(registry.len(), 1);

    let record = Record::new(Utc::now(), UnitSystem::Us, Some(40.0), Some(60.0));
    assert_eq!(registry.get_scalar("chillTime", &record).unwrap().value, 1.0);

    service.shut_down(&mut registry);
    assert!(registry.is_empty());
    assert_eq!(
        registry.get_scalar("chillTime", &record).unwrap_err(),
        XTypeError::UnknownType("chillTime".into())
    );
}

#[test]
fn test_bad_algorithm_never_registers() {
    let mut registry = XTypeRegistry::new();
    let result = ChillTimeService::new(&mut registry, &config("tetens"));
    assert!(matches!(result, Err(XTypeError::UnknownAlgorithm(_))));
    assert!(registry.is_empty());
}

#[test]
fn test_registry_falls_through_to_chill_time() {
    let mut registry = XTypeRegistry::new();
    registry.register(Arc::new(OutTempEcho));
    let service = ChillTimeService::new(&mut registry, &config("utah")).unwrap();

    let record = Record::new(Utc::now(), UnitSystem::Us, Some(50.0), Some(120.0));
    assert_eq!(registry.get_scalar("outTemp", &record).unwrap().value, 50.0);
    assert_eq!(registry.get_scalar("chillHours", &record).unwrap().value, 1.0);

    service.shut_down(&mut registry);
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_registry_aggregate_dispatch() {
    let mut registry = XTypeRegistry::new();
    registry.register(Arc::new(OutTempEcho));
    let _service = ChillTimeService::new(&mut registry, &Config::default()).unwrap();

    let start = Utc.with_ymd_and_hms(2026, 1, 7, 0, 0, 0).unwrap();
    let span = TimeSpan::new(start, start + Duration::hours(6));
    let source = MemorySource::new(
        (1..=6)
            .map(|h| {
                Record::new(
                    start + Duration::hours(h),
                    UnitSystem::Us,
                    Some(40.0),
                    Some(60.0),
                )
            })
            .collect(),
    );

    let total = registry
        .get_aggregate("chillTime", &span, "sum", &source)
        .unwrap();
    assert_eq!(total.value, 6.0);

    assert_eq!(
        registry
            .get_aggregate("chillTime", &span, "max", &source)
            .unwrap_err(),
        XTypeError::UnknownAggregation("max".into())
    );
    assert_eq!(
        registry
            .get_aggregate("rain", &span, "sum", &source)
            .unwrap_err(),
        XTypeError::UnknownType("rain".into())
    );
}
