//! Linear Regression over feature windows
//!
//! Ordinary least squares with an intercept. Features and target are
//! centered, the centered design is solved through its SVD, and the
//! intercept is recovered from the means. Collinear windows (a pure
//! linear trend makes every column a shifted copy of the others) still get
//! a unique, minimum-norm answer instead of a singular-matrix failure.

use forecast_spi::{ForecastError, Regressor, Result};
use tracing::debug;

use crate::linalg::Svd;
use crate::metrics::r_squared;

/// Linear Regression model mapping a window to its next value
///
/// Fits y = intercept + Σ coefficient[j] * x[j].
///
/// # Example
///
/// ```rust
/// use forecast_core::{LinearRegression, Regressor};
///
/// let x = vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0], vec![2.0, 1.0]];
/// let y = vec![3.0, 4.0, 6.0, 8.0];
/// let mut model = LinearRegression::new();
/// model.fit(&x, &y).unwrap();
///
/// let next = model.predict_one(&[3.0, 2.0]).unwrap();
/// assert!((next - 13.0).abs() < 1e-8);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LinearRegression {
    /// Weight per feature column
    coefficients: Vec<f64>,
    intercept: f64,
    /// Effective rank of the centered design matrix
    rank: usize,
    /// R-squared on the training rows
    r_squared: f64,
    fitted: bool,
}

impl LinearRegression {
    /// Create an unfitted model
    pub fn new() -> Self {
        Self::default()
    }

    /// Effective rank of the centered design matrix seen during fitting
    pub fn rank(&self) -> usize {
        self.rank
    }

    /// R-squared on the training rows
    pub fn r_squared(&self) -> f64 {
        self.r_squared
    }

    fn evaluate(&self, row: &[f64]) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(row.iter())
                .map(|(c, x)| c * x)
                .sum::<f64>()
    }
}

fn check_design(x: &[Vec<f64>], y: &[f64]) -> Result<usize> {
    if x.is_empty() {
        return Err(ForecastError::numeric("training set is empty"));
    }
    if x.len() != y.len() {
        return Err(ForecastError::invalid_parameter(
            "y",
            format!("expected {} targets, got {}", x.len(), y.len()),
        ));
    }
    let n_features = x[0].len();
    if n_features == 0 || x.iter().any(|row| row.len() != n_features) {
        return Err(ForecastError::invalid_parameter(
            "x",
            "rows must share a non-zero width",
        ));
    }
    if x.iter().flatten().chain(y.iter()).any(|v| !v.is_finite()) {
        return Err(ForecastError::numeric("training data contains non-finite values"));
    }
    Ok(n_features)
}

impl Regressor for LinearRegression {
    fn fit(&mut self, x: &[Vec<f64>], y: &[f64]) -> Result<()> {
        let p = check_design(x, y)?;
        let n = x.len() as f64;

        let x_mean: Vec<f64> = (0..p)
            .map(|j| x.iter().map(|row| row[j]).sum::<f64>() / n)
            .collect();
        let y_mean = y.iter().sum::<f64>() / n;

        let centered: Vec<Vec<f64>> = x
            .iter()
            .map(|row| row.iter().zip(&x_mean).map(|(v, m)| v - m).collect())
            .collect();
        let y_centered: Vec<f64> = y.iter().map(|v| v - y_mean).collect();

        let svd = Svd::new(&centered);
        let coefficients = svd.solve(&y_centered);
        let intercept = y_mean
            - coefficients
                .iter()
                .zip(&x_mean)
                .map(|(c, m)| c * m)
                .sum::<f64>();

        if !intercept.is_finite() || coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ForecastError::numeric("least-squares solution is not finite"));
        }

        self.coefficients = coefficients;
        self.intercept = intercept;
        self.rank = svd.rank();
        self.fitted = true;

        let fitted: Vec<f64> = x.iter().map(|row| self.evaluate(row)).collect();
        self.r_squared = r_squared(y, &fitted);

        if self.rank < p {
            debug!(
                rank = self.rank,
                features = p,
                rows = x.len(),
                "rank-deficient design, using minimum-norm solution"
            );
        }
        Ok(())
    }

    fn predict_one(&self, row: &[f64]) -> Result<f64> {
        if !self.fitted {
            return Err(ForecastError::NotFitted);
        }
        if row.len() != self.coefficients.len() {
            return Err(ForecastError::invalid_parameter(
                "row",
                format!("expected {} features, got {}", self.coefficients.len(), row.len()),
            ));
        }
        Ok(self.evaluate(row))
    }

    fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    fn intercept(&self) -> f64 {
        self.intercept
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recovers_exact_linear_model() {
        // y = 1 + 2a - b
        let x: Vec<Vec<f64>> = (0..10)
            .map(|i| vec![i as f64, ((i * 7) % 5) as f64])
            .collect();
        let y: Vec<f64> = x.iter().map(|r| 1.0 + 2.0 * r[0] - r[1]).collect();

        let mut model = LinearRegression::new();
        model.fit(&x, &y).unwrap();

        assert!((model.coefficients()[0] - 2.0).abs() < 1e-9);
        assert!((model.coefficients()[1] + 1.0).abs() < 1e-9);
        assert!((model.intercept() - 1.0).abs() < 1e-9);
        assert_eq!(model.rank(), 2);
        assert!(model.r_squared() > 0.999_999);
    }

    #[test]
    fn test_collinear_windows_get_minimum_norm_weights() {
        // Windows of a linear trend: every column is the first plus a constant.
        let x: Vec<Vec<f64>> = (0..12)
            .map(|i| (0..5).map(|k| (i + k) as f64).collect())
            .collect();
        let y: Vec<f64> = (0..12).map(|i| (i + 5) as f64).collect();

        let mut model = LinearRegression::new();
        model.fit(&x, &y).unwrap();

        assert_eq!(model.rank(), 1);
        for c in model.coefficients() {
            assert!((c - 0.2).abs() < 1e-9);
        }
        let next = model.predict_one(&[12.0, 13.0, 14.0, 15.0, 16.0]).unwrap();
        assert!((next - 17.0).abs() < 1e-8);
    }

    #[test]
    fn test_nearly_collinear_columns_still_fit_exactly() {
        // Full rank, but the columns agree to within 1e-6.
        let x: Vec<Vec<f64>> = (0..20)
            .map(|i| {
                let t = i as f64;
                let a = (0.9 * t).sin();
                vec![a, a + 1e-6 * (1.7 * t).cos()]
            })
            .collect();
        let y: Vec<f64> = x.iter().map(|r| r[0] - r[1]).collect();

        let mut model = LinearRegression::new();
        model.fit(&x, &y).unwrap();

        assert_eq!(model.rank(), 2);
        assert!((model.coefficients()[0] - 1.0).abs() < 1e-4);
        assert!((model.coefficients()[1] + 1.0).abs() < 1e-4);
        assert!(model.r_squared() > 0.999_999);
    }

    #[test]
    fn test_constant_features_predict_target_mean() {
        let x = vec![vec![1.0, 1.0]; 4];
        let y = vec![2.0, 4.0, 6.0, 8.0];
        let mut model = LinearRegression::new();
        model.fit(&x, &y).unwrap();
        assert_eq!(model.coefficients(), &[0.0, 0.0]);
        assert_eq!(model.predict_one(&[1.0, 1.0]).unwrap(), 5.0);
    }

    #[test]
    fn test_fit_is_deterministic() {
        let x: Vec<Vec<f64>> = (0..20)
            .map(|i| vec![(i as f64).sin(), (i as f64 * 0.3).cos(), i as f64])
            .collect();
        let y: Vec<f64> = (0..20).map(|i| (i as f64 * 0.5).sin()).collect();

        let mut a = LinearRegression::new();
        let mut b = LinearRegression::new();
        a.fit(&x, &y).unwrap();
        b.fit(&x, &y).unwrap();
        assert_eq!(a.coefficients(), b.coefficients());
        assert_eq!(a.intercept(), b.intercept());
    }

    #[test]
    fn test_empty_training_set_is_numeric_failure() {
        let mut model = LinearRegression::new();
        let err = model.fit(&[], &[]).unwrap_err();
        assert!(matches!(err, ForecastError::NumericFailure(_)));
        assert!(!model.is_fitted());
    }

    #[test]
    fn test_non_finite_training_data_rejected() {
        let mut model = LinearRegression::new();
        let err = model
            .fit(&[vec![1.0], vec![f64::INFINITY]], &[1.0, 2.0])
            .unwrap_err();
        assert!(matches!(err, ForecastError::NumericFailure(_)));
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let mut model = LinearRegression::new();
        let err = model
            .fit(&[vec![1.0, 2.0], vec![1.0]], &[1.0, 2.0])
            .unwrap_err();
        assert!(matches!(err, ForecastError::InvalidParameter { .. }));
    }

    #[test]
    fn test_predict_before_fit() {
        let model = LinearRegression::new();
        assert_eq!(model.predict_one(&[1.0]), Err(ForecastError::NotFitted));
    }

    #[test]
    fn test_predict_wrong_width() {
        let mut model = LinearRegression::new();
        model.fit(&[vec![1.0, 2.0], vec![2.0, 1.0], vec![0.0, 0.0]], &[1.0, 2.0, 0.5]).unwrap();
        assert!(matches!(
            model.predict_one(&[1.0]),
            Err(ForecastError::InvalidParameter { .. })
        ));
    }
}
