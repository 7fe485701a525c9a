//! Extensible observation types.
//!
//! A host keeps an ordered list of providers and probes them in order until
//! one of them does not decline the request.

use crate::error::XTypeError;
use crate::record::{Record, RecordSource, TimeSpan};
use crate::units::ValueTuple;
use std::sync::Arc;

pub trait XType: Send + Sync {
    /// Value of `obs_type` for a single record.
    fn get_scalar(&self, obs_type: &str, _record: &Record) -> Result<ValueTuple, XTypeError> {
        Err(XTypeError::UnknownType(obs_type.to_string()))
    }

    /// Aggregate of `obs_type` over `span`.
    fn get_aggregate(
        &self,
        obs_type: &str,
        _span: &TimeSpan,
        _aggregate_type: &str,
        _source: &dyn RecordSource,
    ) -> Result<ValueTuple, XTypeError> {
        Err(XTypeError::UnknownType(obs_type.to_string()))
    }
}

#[derive(Default)]
pub struct XTypeRegistry {
    providers: Vec<Arc<dyn XType>>,
}

impl XTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, provider: Arc<dyn XType>) {
        self.providers.push(provider);
    }

    /// Remove a previously registered provider. Returns false if it was not present.
    pub fn unregister(&mut self, provider: &Arc<dyn XType>) -> bool {
        match self.providers.iter().position(|p| Arc::ptr_eq(p, provider)) {
            Some(index) => {
                self.providers.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn get_scalar(&self, obs_type: &str, record: &Record) -> Result<ValueTuple, XTypeError> {
        let mut cannot_calculate = false;
        for provider in &self.providers {
            match provider.get_scalar(obs_type, record) {
                Ok(vt) => return Ok(vt),
                Err(XTypeError::UnknownType(_)) => {}
                Err(XTypeError::CannotCalculate(_)) => cannot_calculate = true,
                Err(e) => return Err(e),
            }
        }

        if cannot_calculate {
            Err(XTypeError::CannotCalculate(obs_type.to_string()))
        } else {
            Err(XTypeError::UnknownType(obs_type.to_string()))
        }
    }

    pub fn get_aggregate(
        &self,
        obs_type: &str,
        span: &TimeSpan,
        aggregate_type: &str,
        source: &dyn RecordSource,
    ) -> Result<ValueTuple, XTypeError> {
        let mut unknown_aggregation = false;
        for provider in &self.providers {
            match provider.get_aggregate(obs_type, span, aggregate_type, source) {
                Ok(vt) => return Ok(vt),
                Err(XTypeError::UnknownType(_)) => {}
                Err(XTypeError::UnknownAggregation(_)) => unknown_aggregation = true,
                Err(e) => return Err(e),
            }
        }

        if unknown_aggregation {
            Err(XTypeError::UnknownAggregation(aggregate_type.to_string()))
        } else {
            Err(XTypeError::UnknownType(obs_type.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::MemorySource;
    use crate::units::{Unit, UnitGroup, UnitSystem};
    use chrono::{TimeZone, Utc};

    struct Fixed(&'static str, f64);

    impl XType for Fixed {
        fn get_scalar(&self, obs_type: &str, _record: &Record) -> Result<ValueTuple, XTypeError> {
            if obs_type != self.0 {
                return Err(XTypeError::UnknownType(obs_type.to_string()));
            }
            Ok(ValueTuple::new(self.1, Unit::Hour, UnitGroup::Elapsed))
        }
    }

    struct NeverEnoughData;

    impl XType for NeverEnoughData {
        fn get_scalar(&self, obs_type: &str, _record: &Record) -> Result<ValueTuple, XTypeError> {
            Err(XTypeError::CannotCalculate(obs_type.to_string()))
        }
    }

    fn record() -> Record {
        Record::new(Utc::now(), UnitSystem::Us, Some(40.0), Some(5.0))
    }

    #[test]
    fn test_first_provider_wins() {
        let mut registry = XTypeRegistry::new();
        registry.register(Arc::new(Fixed("a", 1.0)));
        registry.register(Arc::new(Fixed("a", 2.0)));
        assert_eq!(registry.get_scalar("a", &record()).unwrap().value, 1.0);
    }

    #[test]
    fn test_declined_provider_is_skipped() {
        let mut registry = XTypeRegistry::new();
        registry.register(Arc::new(Fixed("a", 1.0)));
        registry.register(Arc::new(Fixed("b", 2.0)));
        assert_eq!(registry.get_scalar("b", &record()).unwrap().value, 2.0);
        assert_eq!(
            registry.get_scalar("c", &record()).unwrap_err(),
            XTypeError::UnknownType("c".into())
        );
    }

    #[test]
    fn test_cannot_calculate_falls_through() {
        let mut registry = XTypeRegistry::new();
        registry.register(Arc::new(NeverEnoughData));
        assert_eq!(
            registry.get_scalar("a", &record()).unwrap_err(),
            XTypeError::CannotCalculate("a".into())
        );

        registry.register(Arc::new(Fixed("a", 3.0)));
        assert_eq!(registry.get_scalar("a", &record()).unwrap().value, 3.0);
    }

    #[test]
    fn test_unregister_by_identity() {
        let mut registry = XTypeRegistry::new();
        let first: Arc<dyn XType> = Arc::new(Fixed("a", 1.0));
        let twin: Arc<dyn XType> = Arc::new(Fixed("a", 1.0));
        registry.register(first.clone());

        assert!(!registry.unregister(&twin));
        assert_eq!(registry.len(), 1);
        assert!(registry.unregister(&first));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_default_aggregate_declines() {
        let mut registry = XTypeRegistry::new();
        registry.register(Arc::new(Fixed("a", 1.0)));
        let span = TimeSpan::new(
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap(),
        );
        let err = registry
            .get_aggregate("a", &span, "sum", &MemorySource::default())
            .unwrap_err();
        assert_eq!(err, XTypeError::UnknownType("a".into()));
    }
}
