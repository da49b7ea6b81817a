//! Success-or-failure record for detection requests.

use serde::{Deserialize, Serialize};

use super::AnomalyResult;
use crate::error::{AnomalyError, Result};

/// Failure side of an anomaly outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyFailure {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
}

/// Tagged union of a detection result; serializes untagged so callers
/// branch on the presence of `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnomalyOutcome {
    Detected(AnomalyResult),
    Failure(AnomalyFailure),
}

impl AnomalyOutcome {
    /// Fold a detection result for `channel` into an outcome record.
    pub fn for_channel(channel: &str, result: Result<AnomalyResult>) -> Self {
        match result {
            Ok(result) => Self::Detected(result),
            Err(err) => Self::Failure(AnomalyFailure {
                error: err.to_string(),
                channel: Some(channel.to_string()),
            }),
        }
    }

    pub fn result(&self) -> Option<&AnomalyResult> {
        match self {
            Self::Detected(result) => Some(result),
            Self::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Detected(_) => None,
            Self::Failure(failure) => Some(&failure.error),
        }
    }
}

impl From<Result<AnomalyResult>> for AnomalyOutcome {
    fn from(result: Result<AnomalyResult>) -> Self {
        match result {
            Ok(result) => Self::Detected(result),
            Err(err) => Self::Failure(AnomalyFailure::from(err)),
        }
    }
}

impl From<AnomalyError> for AnomalyFailure {
    fn from(err: AnomalyError) -> Self {
        let channel = match &err {
            AnomalyError::ModelNotReady { channel } => Some(channel.clone()),
            _ => None,
        };
        Self {
            error: err.to_string(),
            channel,
        }
    }
}
