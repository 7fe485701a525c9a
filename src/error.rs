//! Error taxonomy for metric providers.
//!
//! Uses thiserror so the host can match on the variant and decide whether to
//! try the next provider.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum XTypeError {
    /// The provider does not compute this observation type.
    #[error("unknown observation type '{0}'")]
    UnknownType(String),

    /// The record lacks the fields needed for the calculation.
    #[error("cannot calculate '{0}': record is missing required fields")]
    CannotCalculate(String),

    /// The provider does not support this aggregation.
    #[error("unknown aggregation type '{0}'")]
    UnknownAggregation(String),

    /// Configured algorithm name is not one of simple, utah or modified.
    #[error("unrecognized chill time algorithm '{0}'")]
    UnknownAlgorithm(String),

    #[error("no standard unit for '{obs_type}' in unit system {system}")]
    UnknownUnit { obs_type: String, system: String },

    #[error("unknown unit system code {0}")]
    UnknownUnitSystem(u8),

    #[error("cannot convert from {from} to {to}")]
    IncompatibleUnits { from: String, to: String },

    /// The record source failed while streaming records.
    #[error("record source error: {0}")]
    Source(String),
}

impl XTypeError {
    /// True when the error means "not my responsibility" rather than a failure.
    pub fn is_declined(&self) -> bool {
        matches!(
            self,
            XTypeError::UnknownType(_) | XTypeError::UnknownAggregation(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declined_variants() {
        assert!(XTypeError::UnknownType("outTemp".into()).is_declined());
        assert!(XTypeError::UnknownAggregation("avg".into()).is_declined());
        assert!(!XTypeError::CannotCalculate("chillTime".into()).is_declined());
        assert!(!XTypeError::UnknownAlgorithm("tetens".into()).is_declined());
    }

    #[test]
    fn test_display_names_algorithm() {
        let err = XTypeError::UnknownAlgorithm("tetens".into());
        assert_eq!(err.to_string(), "unrecognized chill time algorithm 'tetens'");
    }
}
