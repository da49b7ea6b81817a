//! Anomaly detection error types.

use series::SeriesError;
use thiserror::Error;

/// Anomaly detection errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnomalyError {
    #[error("Insufficient data: required {required}, got {got}")]
    InsufficientData { required: usize, got: usize },

    #[error("Detector not fitted: call fit() before detect()")]
    NotFitted,

    #[error("No anomaly model for channel '{channel}'")]
    ModelNotReady { channel: String },

    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Numerical failure: {0}")]
    NumericFailure(String),

    #[error("Timestamp mismatch: {windows} windows need at least as many timestamps, got {timestamps}")]
    TimestampMismatch { windows: usize, timestamps: usize },

    #[error(transparent)]
    Series(#[from] SeriesError),
}

impl AnomalyError {
    pub fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for anomaly detection operations.
pub type Result<T> = std::result::Result<T, AnomalyError>;
