//! Anomaly Detection Core
//!
//! Reconstruction-based anomaly detection: a small bottleneck autoencoder
//! trained on min-max scaled windows, a statistically calibrated error
//! threshold, and a registry that keeps one fitted detector per channel.

pub mod calibration;
pub mod detector;
pub mod network;
pub mod optimizer;
pub mod registry;
pub mod scaler;

// Re-export SPI traits for implementations
pub use anomaly_spi::{
    AnomalyDetector, AnomalyError, AnomalyFailure, AnomalyOutcome, AnomalyResult, Result,
    Timestamp, TrainingSummary,
};

// Re-export main types
pub use detector::AutoencoderDetector;
pub use network::{Activation, Autoencoder, Dense};
pub use optimizer::Adam;
pub use registry::ModelRegistry;
pub use scaler::MinMaxScaler;
