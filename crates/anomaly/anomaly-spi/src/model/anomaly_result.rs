//! Anomaly detection result types.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use series::Timestamp;

use crate::error::{AnomalyError, Result};

/// Per-window anomaly labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyResult {
    /// Mean squared reconstruction error per window.
    pub reconstruction_error: Vec<f64>,
    /// `reconstruction_error[i] > threshold`.
    pub is_anomaly: Vec<bool>,
    /// Threshold used for detection.
    pub threshold: f64,
    /// Timestamp of the last sample covered by each window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamps: Option<Vec<Timestamp>>,
    /// Sorted, distinct calendar dates with at least one anomalous window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anomaly_dates: Option<Vec<NaiveDate>>,
}

impl AnomalyResult {
    /// Label scores against `threshold`.
    ///
    /// Window `i` covers samples `i..i + w`, so it is stamped with the
    /// timestamp of its last sample: the trailing `scores.len()` timestamps
    /// are kept and the leading ones dropped.
    pub fn from_scores(
        scores: Vec<f64>,
        threshold: f64,
        timestamps: Option<&[Timestamp]>,
    ) -> Result<Self> {
        let is_anomaly: Vec<bool> = scores.iter().map(|&s| s > threshold).collect();

        let (timestamps, anomaly_dates) = match timestamps {
            None => (None, None),
            Some(stamps) => {
                if stamps.len() < scores.len() {
                    return Err(AnomalyError::TimestampMismatch {
                        windows: scores.len(),
                        timestamps: stamps.len(),
                    });
                }
                let aligned = stamps[stamps.len() - scores.len()..].to_vec();
                let dates = aligned
                    .iter()
                    .zip(&is_anomaly)
                    .filter(|&(_, &flagged)| flagged)
                    .map(|(ts, _)| ts.date())
                    .collect::<std::result::Result<BTreeSet<_>, _>>()?;
                (Some(aligned), Some(dates.into_iter().collect()))
            }
        };

        Ok(Self {
            reconstruction_error: scores,
            is_anomaly,
            threshold,
            timestamps,
            anomaly_dates,
        })
    }

    /// Get indices of detected anomalies.
    pub fn anomaly_indices(&self) -> Vec<usize> {
        self.is_anomaly
            .iter()
            .enumerate()
            .filter_map(|(i, &is_anomaly)| if is_anomaly { Some(i) } else { None })
            .collect()
    }

    /// Count of detected anomalies.
    pub fn anomaly_count(&self) -> usize {
        self.is_anomaly.iter().filter(|&&x| x).count()
    }
}
