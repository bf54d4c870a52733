//! Error types for the signal pipeline.

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum SignalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Indicator error: {0}")]
    Indicator(#[from] IndicatorError),

    #[error("Policy error: {0}")]
    Policy(#[from] PolicyError),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Indicator parameter errors.
///
/// Running out of data is not an error: short series produce `None` markers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IndicatorError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Signal policy errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PolicyError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Policy not found: {0}")]
    NotFound(String),

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Policy '{policy}' produced an inconsistent decision: {reason}")]
    Violation { policy: String, reason: String },
}

/// Data source and event sink errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Data file not found: {0}")]
    NotFound(String),

    #[error("No data available for the requested window")]
    NoDataAvailable,

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Journal error: {0}")]
    Journal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_message() {
        let err = PolicyError::Violation {
            policy: "confluence".to_string(),
            reason: "target 90 must be above entry 100".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Policy 'confluence' produced an inconsistent decision: target 90 must be above entry 100"
        );
    }

    #[test]
    fn test_conversion_into_signal_error() {
        let err: SignalError = IndicatorError::InvalidParameter("period must be > 0".into()).into();
        assert!(matches!(err, SignalError::Indicator(_)));

        let err: SignalError = PolicyError::NotFound("momentum".into()).into();
        assert_eq!(err.to_string(), "Policy error: Policy not found: momentum");
    }
}
