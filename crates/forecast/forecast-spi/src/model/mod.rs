//! Model module containing data structures

mod forecast_outcome;
mod forecast_report;

pub use forecast_outcome::{ForecastFailure, ForecastOutcome};
pub use forecast_report::{ForecastReport, ModelQuality};
