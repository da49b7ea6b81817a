//! Regressor trait for supervised window-to-value models

use crate::error::Result;

/// A supervised model mapping a feature row to a single value.
///
/// Fitting is closed-form for the shipped implementation, so fitting the
/// same data twice yields identical coefficients.
pub trait Regressor: Send + Sync {
    /// Fit the model on rows `x` with targets `y`
    fn fit(&mut self, x: &[Vec<f64>], y: &[f64]) -> Result<()>;

    /// Predict the target for one row
    fn predict_one(&self, row: &[f64]) -> Result<f64>;

    /// Predict targets for several rows
    fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>> {
        rows.iter().map(|row| self.predict_one(row)).collect()
    }

    /// Fitted weight per feature column
    fn coefficients(&self) -> &[f64];

    /// Fitted constant term
    fn intercept(&self) -> f64;

    /// Check if the model has been fitted
    fn is_fitted(&self) -> bool;
}
