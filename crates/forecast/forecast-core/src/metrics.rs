//! Forecast accuracy metrics
//!
//! Mismatched or empty inputs yield NaN rather than an error; callers decide
//! whether a non-finite metric is fatal.

/// Mean Squared Error (MSE)
///
/// # Example
///
/// ```rust
/// use forecast_core::metrics::mse;
///
/// let actual = vec![1.0, 2.0, 3.0];
/// let predicted = vec![1.0, 2.0, 5.0];
/// assert!((mse(&actual, &predicted) - 4.0 / 3.0).abs() < 1e-12);
/// ```
pub fn mse(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }

    let sum: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum();

    sum / actual.len() as f64
}

/// Root Mean Squared Error (RMSE)
///
/// Square root of MSE. Same scale as the data.
pub fn rmse(actual: &[f64], predicted: &[f64]) -> f64 {
    mse(actual, predicted).sqrt()
}

/// R-squared (Coefficient of Determination)
///
/// 1.0 = perfect, 0.0 = same as predicting the mean, negative = worse.
/// Undefined (NaN) for fewer than two samples. A constant target scores 1.0
/// when predicted exactly and 0.0 otherwise.
pub fn r_squared(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.len() < 2 {
        return f64::NAN;
    }

    let mean = actual.iter().sum::<f64>() / actual.len() as f64;

    let ss_tot: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();
    let ss_res: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum();

    if ss_tot == 0.0 {
        return if ss_res == 0.0 { 1.0 } else { 0.0 };
    }

    1.0 - ss_res / ss_tot
}
