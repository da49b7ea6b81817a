//! Training summary returned by `fit`.

use serde::{Deserialize, Serialize};

/// Outcome of fitting a detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSummary {
    /// Full-batch loss after the last epoch
    pub final_loss: f64,
    pub epochs: usize,
    /// Number of training windows
    pub windows: usize,
    /// Calibrated anomaly threshold
    pub threshold: f64,
    /// Per-window reconstruction error on the training data after training
    pub training_errors: Vec<f64>,
}
