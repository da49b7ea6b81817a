//! Success-or-failure record returned across the service boundary.

use serde::{Deserialize, Serialize};

use super::ForecastReport;
use crate::error::{ForecastError, Result};

/// Failure side of a forecast outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastFailure {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_required: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_points: Option<usize>,
}

impl From<ForecastError> for ForecastFailure {
    fn from(err: ForecastError) -> Self {
        match err {
            ForecastError::InsufficientData { required, actual } => Self {
                error: "Not enough data points for prediction".to_string(),
                min_required: Some(required),
                current_points: Some(actual),
            },
            other => Self {
                error: other.to_string(),
                min_required: None,
                current_points: None,
            },
        }
    }
}

/// Tagged union of a forecast result.
///
/// Serializes untagged, so callers branch on the presence of `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ForecastOutcome {
    Success(ForecastReport),
    Failure(ForecastFailure),
}

impl ForecastOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn report(&self) -> Option<&ForecastReport> {
        match self {
            Self::Success(report) => Some(report),
            Self::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(&failure.error),
        }
    }
}

impl From<Result<ForecastReport>> for ForecastOutcome {
    fn from(result: Result<ForecastReport>) -> Self {
        match result {
            Ok(report) => Self::Success(report),
            Err(err) => Self::Failure(err.into()),
        }
    }
}
