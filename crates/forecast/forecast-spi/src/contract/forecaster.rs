//! Forecaster trait

use crate::error::Result;
use crate::model::ForecastReport;

/// Builds a model from one series and reports accuracy plus future values.
///
/// Every call retrains from the full series handed in; nothing is kept
/// between calls.
pub trait Forecaster: Send + Sync {
    /// Fit, evaluate and forecast in one pass
    fn forecast(&self, data: &[f64]) -> Result<ForecastReport>;

    /// Minimum number of samples accepted by [`Forecaster::forecast`]
    fn min_required(&self) -> usize;
}
