//! Threshold calibration from training reconstruction errors.
//!
//! The threshold is a fixed rule, `mean + k * std` with the population
//! standard deviation. It assumes the training errors are roughly unimodal
//! and mostly normal.

/// Arithmetic mean; `NaN` when empty.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divides by `n`); `NaN` when empty.
pub fn std_dev(values: &[f64]) -> f64 {
    let m = mean(values);
    if m.is_nan() {
        return f64::NAN;
    }
    let variance = values.iter().map(|x| (x - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// `mean(errors) + sigma * std_dev(errors)`.
pub fn threshold(errors: &[f64], sigma: f64) -> f64 {
    mean(errors) + sigma * std_dev(errors)
}
