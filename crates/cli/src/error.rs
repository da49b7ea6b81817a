//! CLI error type

use std::io;
use std::path::PathBuf;

use series::SeriesError;
use thiserror::Error;

pub type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write output: {0}")]
    Write(#[from] io::Error),

    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Series(#[from] SeriesError),

    #[error("Column '{0}' not found")]
    ColumnNotFound(String),

    #[error("Unsupported input layout: {0}")]
    UnsupportedInput(String),

    #[error("No numeric columns found")]
    NoNumericColumns,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_not_found_display() {
        let err = CliError::ColumnNotFound("Strain(9)".to_string());
        assert_eq!(err.to_string(), "Column 'Strain(9)' not found");
    }

    #[test]
    fn test_series_error_is_transparent() {
        let err: CliError = SeriesError::InvalidTimestamp("soon".to_string()).into();
        assert_eq!(err.to_string(), "Invalid timestamp: soon");
    }
}
