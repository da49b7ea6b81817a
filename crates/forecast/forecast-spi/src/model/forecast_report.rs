//! Forecast result types

use serde::{Deserialize, Serialize};

/// Qualitative grade of held-out accuracy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelQuality {
    Good,
    Moderate,
    Poor,
}

impl ModelQuality {
    /// Grade an R² score: above 0.7 is good, above 0.5 moderate, anything
    /// else (including NaN) poor.
    pub fn from_r2(r2: f64) -> Self {
        if r2 > 0.7 {
            Self::Good
        } else if r2 > 0.5 {
            Self::Moderate
        } else {
            Self::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Moderate => "moderate",
            Self::Poor => "poor",
        }
    }
}

/// Successful forecast: held-out accuracy plus iterated future values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReport {
    /// Coefficient of determination on the held-out windows
    pub r2_score: f64,
    /// Root-mean-square error on the held-out windows
    pub rmse: f64,
    /// Predictions beyond the last sample; each step conditions on the
    /// previous predictions, so error compounds with the horizon.
    pub future_predictions: Vec<f64>,
    pub model_quality: ModelQuality,
    /// Windows used for fitting (chronologically first)
    pub train_windows: usize,
    /// Windows held out for evaluation (chronologically last)
    pub test_windows: usize,
    /// Fitted weight per window position, oldest first
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}
