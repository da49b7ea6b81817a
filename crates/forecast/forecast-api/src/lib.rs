//! Forecast Consumer API
//!
//! Configuration for the sliding-window forecaster.
//!
//! This crate provides:
//! - [`ForecastConfig`] with the documented defaults and validation
//! - Re-exports from SPI for convenience

pub use forecast_spi::{
    ForecastError, ForecastFailure, ForecastOutcome, ForecastReport, Forecaster, ModelQuality,
    Regressor, Result,
};

use serde::{Deserialize, Serialize};

/// Default samples per window
pub const DEFAULT_WINDOW_SIZE: usize = 5;
/// Default forecast horizon
pub const DEFAULT_FUTURE_STEPS: usize = 3;
/// Default share of windows held out for evaluation
pub const DEFAULT_TEST_FRACTION: f64 = 0.2;

/// Configuration for the sliding-window forecaster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Samples per input window
    pub window_size: usize,
    /// Number of values to forecast past the end of the series
    pub future_steps: usize,
    /// Trailing share of windows held out for evaluation
    pub test_fraction: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            future_steps: DEFAULT_FUTURE_STEPS,
            test_fraction: DEFAULT_TEST_FRACTION,
        }
    }
}

impl ForecastConfig {
    pub fn new(window_size: usize, future_steps: usize) -> Self {
        Self {
            window_size,
            future_steps,
            ..Self::default()
        }
    }

    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn with_future_steps(mut self, future_steps: usize) -> Self {
        self.future_steps = future_steps;
        self
    }

    pub fn with_test_fraction(mut self, test_fraction: f64) -> Self {
        self.test_fraction = test_fraction;
        self
    }

    /// Share of windows used for fitting.
    pub fn train_fraction(&self) -> f64 {
        1.0 - self.test_fraction
    }

    /// Smallest series the forecaster accepts: one full window plus its label.
    pub fn min_required(&self) -> usize {
        self.window_size + 1
    }

    /// Check parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(ForecastError::invalid_parameter(
                "window_size",
                "must be at least 1",
            ));
        }
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(ForecastError::invalid_parameter(
                "test_fraction",
                "must be strictly between 0 and 1",
            ));
        }
        Ok(())
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::ForecastConfig;
    pub use forecast_spi::{
        ForecastError, ForecastOutcome, ForecastReport, Forecaster, ModelQuality, Regressor,
        Result,
    };
}
