//! Per-feature min-max scaling.

use anomaly_spi::{AnomalyError, Result};

/// Maps each column of a window matrix onto `[0, 1]` using the training
/// minimum and range. Columns with zero range are shifted but not stretched.
///
/// Fitted once; later calls to [`MinMaxScaler::transform`] reuse the
/// training statistics, so inference data can fall outside `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct MinMaxScaler {
    min: Vec<f64>,
    range: Vec<f64>,
}

impl MinMaxScaler {
    /// Fit on a non-empty matrix of equal-width rows.
    pub fn fit(rows: &[Vec<f64>]) -> Result<Self> {
        let width = match rows.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => {
                return Err(AnomalyError::InsufficientData {
                    required: 1,
                    got: 0,
                })
            }
        };
        if rows.iter().any(|row| row.len() != width) {
            return Err(AnomalyError::invalid_parameter(
                "rows",
                "all rows must have the same width",
            ));
        }

        let mut min = vec![f64::INFINITY; width];
        let mut max = vec![f64::NEG_INFINITY; width];
        for row in rows {
            for (j, &x) in row.iter().enumerate() {
                min[j] = min[j].min(x);
                max[j] = max[j].max(x);
            }
        }
        let range = min
            .iter()
            .zip(&max)
            .map(|(lo, hi)| {
                let r = hi - lo;
                if r == 0.0 {
                    1.0
                } else {
                    r
                }
            })
            .collect();

        Ok(Self { min, range })
    }

    /// Number of columns the scaler was fitted on.
    pub fn features(&self) -> usize {
        self.min.len()
    }

    pub fn transform_row(&self, row: &[f64]) -> Vec<f64> {
        row.iter()
            .zip(self.min.iter().zip(&self.range))
            .map(|(&x, (lo, r))| (x - lo) / r)
            .collect()
    }

    pub fn transform(&self, rows: &[Vec<f64>]) -> Vec<Vec<f64>> {
        rows.iter().map(|row| self.transform_row(row)).collect()
    }
}
