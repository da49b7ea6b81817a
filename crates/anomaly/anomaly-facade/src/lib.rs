//! Anomaly Detection Facade
//!
//! Unified re-exports for the anomaly detection stack:
//! - `AnomalyDetector` contract and result records from SPI
//! - `DetectorConfig`, `RegistryConfig` and `MissingModelPolicy` from API
//! - `AutoencoderDetector` and `ModelRegistry` from Core
//!
//! ```rust
//! use anomaly_facade::{ModelRegistry, RegistryConfig, DetectorConfig};
//!
//! let strain: Vec<f64> = (0..60).map(|i| 100.0 + (i as f64 * 0.3).sin()).collect();
//! let registry = ModelRegistry::new(RegistryConfig::new(DetectorConfig::default().with_epochs(10)));
//! registry.fit("Strain(1)", &strain).unwrap();
//! let result = registry.detect("Strain(1)", &strain, None).unwrap();
//! assert_eq!(result.is_anomaly.len(), strain.len() - 4);
//! ```

// Re-export everything from API (which includes SPI)
pub use anomaly_api::*;

// Re-export core modules for direct access
pub use anomaly_core::{calibration, detector, network, optimizer, registry, scaler};

// Re-export implementations at root
pub use anomaly_core::{
    Activation, Adam, Autoencoder, AutoencoderDetector, Dense, MinMaxScaler, ModelRegistry,
};

/// Fit a fresh detector on `series` and label that same series.
///
/// Training and scoring share data here; use a [`ModelRegistry`] or an
/// [`AutoencoderDetector`] directly to score held-out data.
pub fn detect_anomalies(
    series: &[f64],
    timestamps: Option<&[Timestamp]>,
    config: &DetectorConfig,
) -> AnomalyOutcome {
    let mut detector = AutoencoderDetector::new(config.clone());
    detector
        .fit(series)
        .and_then(|_| detector.detect(series, timestamps))
        .into()
}
