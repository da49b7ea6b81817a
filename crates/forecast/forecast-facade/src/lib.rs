//! Forecast Facade
//!
//! High-level API for sensor forecasting. Re-exports all public types
//! from the forecast stack for convenient usage.
//!
//! ```rust
//! use forecast_facade::{forecast, ForecastConfig};
//!
//! let battery: Vec<f64> = (0..40).map(|i| 12.6 - i as f64 * 0.01).collect();
//! let outcome = forecast(&battery, &ForecastConfig::default());
//! assert_eq!(outcome.report().unwrap().future_predictions.len(), 3);
//! ```

// Re-export everything from API (which includes SPI)
pub use forecast_api::*;

// Re-export core modules for direct access
pub use forecast_core::{channels, forecaster, linalg, metrics, regression};

// Re-export implementations at root
pub use forecast_core::{forecast_channels, LinearRegression, WindowForecaster};

/// Fit, score and forecast one series, folding any error into the outcome.
pub fn forecast(series: &[f64], config: &ForecastConfig) -> ForecastOutcome {
    WindowForecaster::new(config.clone()).forecast(series).into()
}
