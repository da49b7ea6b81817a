//! Anomaly detector trait definition.

use series::Timestamp;

use crate::error::{AnomalyError, Result};
use crate::model::{AnomalyResult, TrainingSummary};

/// Window-based anomaly detector.
///
/// `fit` learns what normal windows look like and calibrates a threshold;
/// `detect` scores new data against that state without refitting.
pub trait AnomalyDetector: Send + Sync {
    /// Fit the detector to training data.
    fn fit(&mut self, data: &[f64]) -> Result<TrainingSummary>;

    /// Per-window anomaly scores without thresholding.
    fn score(&self, data: &[f64]) -> Result<Vec<f64>>;

    /// Calibrated threshold, once fitted.
    fn threshold(&self) -> Option<f64>;

    /// Samples per window.
    fn window_size(&self) -> usize;

    /// Check if detector has been fitted.
    fn is_fitted(&self) -> bool {
        self.threshold().is_some()
    }

    /// Score and label every window, aligning timestamps when given.
    fn detect(&self, data: &[f64], timestamps: Option<&[Timestamp]>) -> Result<AnomalyResult> {
        let threshold = self.threshold().ok_or(AnomalyError::NotFitted)?;
        let scores = self.score(data)?;
        AnomalyResult::from_scores(scores, threshold, timestamps)
    }
}
