//! Forecast Core
//!
//! Least-squares regression over sliding windows, held-out accuracy
//! metrics, and iterated multi-step forecasting.

pub mod channels;
pub mod forecaster;
pub mod linalg;
pub mod metrics;
pub mod regression;

// Re-export SPI traits for implementations
pub use forecast_spi::{
    ForecastError, ForecastFailure, ForecastOutcome, ForecastReport, Forecaster, ModelQuality,
    Regressor, Result,
};

// Re-export main types
pub use channels::forecast_channels;
pub use forecaster::WindowForecaster;
pub use regression::LinearRegression;
