//! Anomaly Detection API
//!
//! Configuration types for the reconstruction detector and the per-channel
//! model registry.

use serde::{Deserialize, Serialize};

// Re-export SPI types
pub use anomaly_spi::{
    AnomalyDetector, AnomalyError, AnomalyFailure, AnomalyOutcome, AnomalyResult, Result,
    Timestamp, TrainingSummary,
};

/// Default samples per window
pub const DEFAULT_WINDOW_SIZE: usize = 5;
/// Default number of full-batch training epochs
pub const DEFAULT_EPOCHS: usize = 50;
/// Default Adam step size
pub const DEFAULT_LEARNING_RATE: f64 = 0.001;
/// Default number of standard deviations above the mean training error
pub const DEFAULT_THRESHOLD_SIGMA: f64 = 2.0;
/// Default seed for weight initialisation
pub const DEFAULT_SEED: u64 = 42;

// ============================================================================
// Detector Configuration
// ============================================================================

/// Autoencoder detector configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Samples per window; also the autoencoder's input width.
    pub window_size: usize,
    /// Full-batch passes over the training windows.
    pub epochs: usize,
    /// Adam learning rate.
    pub learning_rate: f64,
    /// Threshold is `mean + threshold_sigma * std` of the training errors.
    pub threshold_sigma: f64,
    /// Seed for weight initialisation.
    pub seed: u64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            epochs: DEFAULT_EPOCHS,
            learning_rate: DEFAULT_LEARNING_RATE,
            threshold_sigma: DEFAULT_THRESHOLD_SIGMA,
            seed: DEFAULT_SEED,
        }
    }
}

impl DetectorConfig {
    pub fn new(window_size: usize, epochs: usize) -> Self {
        Self {
            window_size,
            epochs,
            ..Self::default()
        }
    }

    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn with_epochs(mut self, epochs: usize) -> Self {
        self.epochs = epochs;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_threshold_sigma(mut self, threshold_sigma: f64) -> Self {
        self.threshold_sigma = threshold_sigma;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check parameter ranges.
    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(AnomalyError::invalid_parameter(
                "window_size",
                "must be at least 1",
            ));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(AnomalyError::invalid_parameter(
                "learning_rate",
                "must be a positive finite number",
            ));
        }
        if !(self.threshold_sigma.is_finite() && self.threshold_sigma >= 0.0) {
            return Err(AnomalyError::invalid_parameter(
                "threshold_sigma",
                "must be a non-negative finite number",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Registry Configuration
// ============================================================================

/// What `detect` does when a channel has no fitted model yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingModelPolicy {
    /// Fit on the series being scored, then detect on that same series.
    #[default]
    FitOnDemand,
    /// Fail with `ModelNotReady`; the caller must fit explicitly.
    Reject,
}

/// Per-channel model registry configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Configuration for every detector the registry creates.
    pub detector: DetectorConfig,
    pub missing_model: MissingModelPolicy,
}

impl RegistryConfig {
    pub fn new(detector: DetectorConfig) -> Self {
        Self {
            detector,
            ..Self::default()
        }
    }

    pub fn with_missing_model(mut self, policy: MissingModelPolicy) -> Self {
        self.missing_model = policy;
        self
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{DetectorConfig, MissingModelPolicy, RegistryConfig};
    pub use anomaly_spi::{
        AnomalyDetector, AnomalyError, AnomalyOutcome, AnomalyResult, Result, Timestamp,
        TrainingSummary,
    };
}
