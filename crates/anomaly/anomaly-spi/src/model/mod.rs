//! Data models for anomaly detection.
//!
//! This module contains data structures used throughout the anomaly detection system.

mod anomaly_outcome;
mod anomaly_result;
mod training_summary;

pub use anomaly_outcome::{AnomalyFailure, AnomalyOutcome};
pub use anomaly_result::AnomalyResult;
pub use training_summary::TrainingSummary;
