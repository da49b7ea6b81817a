//! # series
//!
//! Shared data model for sensor channels: ordered numeric samples with
//! optional timestamps, plus the sliding-window framing used by both the
//! forecaster and the anomaly detector.
//!
//! ## Example
//!
//! ```rust
//! use series::{sliding_windows, supervised_windows};
//!
//! let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
//! assert_eq!(sliding_windows(&data, 5).len(), 2);
//!
//! let (x, y) = supervised_windows(&data, 5);
//! assert_eq!(x, vec![vec![1.0, 2.0, 3.0, 4.0, 5.0]]);
//! assert_eq!(y, vec![6.0]);
//! ```

mod error;
mod timestamp;
pub mod window;

pub use error::{Result, SeriesError};
pub use timestamp::Timestamp;
pub use window::{sliding_windows, supervised_windows};

use serde::{Deserialize, Serialize};

/// Ordered samples for one sensor channel.
///
/// Values are never mutated once the series is built. Timestamps, when
/// present, run parallel to the values and may be longer than them (the
/// trailing ones are the ones that matter for window alignment).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    values: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timestamps: Option<Vec<Timestamp>>,
}

impl Series {
    /// Create a series without timestamps.
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            timestamps: None,
        }
    }

    /// Create a timestamped series.
    ///
    /// Fails when there are fewer timestamps than values.
    pub fn with_timestamps(values: Vec<f64>, timestamps: Vec<Timestamp>) -> Result<Self> {
        if timestamps.len() < values.len() {
            return Err(SeriesError::TimestampLengthMismatch {
                values: values.len(),
                timestamps: timestamps.len(),
            });
        }
        Ok(Self {
            values,
            timestamps: Some(timestamps),
        })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn timestamps(&self) -> Option<&[Timestamp]> {
        self.timestamps.as_deref()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True when every value is finite.
    pub fn is_finite(&self) -> bool {
        self.values.iter().all(|v| v.is_finite())
    }
}

impl From<Vec<f64>> for Series {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}

impl AsRef<[f64]> for Series {
    fn as_ref(&self) -> &[f64] {
        &self.values
    }
}
