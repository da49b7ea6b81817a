//! Forecast Service Provider Interface
//!
//! Defines the regression and forecasting contracts, the forecast error type,
//! and the result records handed back to callers.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{Forecaster, Regressor};
pub use error::{ForecastError, Result};
pub use model::{ForecastFailure, ForecastOutcome, ForecastReport, ModelQuality};
