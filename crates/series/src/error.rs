//! Series error types

use thiserror::Error;

/// Result type alias for series operations
pub type Result<T> = std::result::Result<T, SeriesError>;

/// Errors raised while building a series or reading its timestamps
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeriesError {
    /// Fewer timestamps than samples
    #[error("Timestamp length mismatch: {values} values but only {timestamps} timestamps")]
    TimestampLengthMismatch { values: usize, timestamps: usize },

    /// Timestamp text or epoch value could not be interpreted
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}
