//! Tabular input loading
//!
//! Sensor exports arrive as CSV with a header row, or as JSON in one of
//! three layouts: an array of numbers, an array of row objects, or an
//! object mapping column names to arrays. All of them are read into a
//! [`Table`] of text cells so that numeric and timestamp columns are parsed
//! the same way.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde_json::Value;
use series::{Series, Timestamp};
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Column name used when the input is a bare array of numbers.
pub const DEFAULT_COLUMN: &str = "value";

/// Rows of text cells under named columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Load from a file, picking the format by extension (CSV otherwise).
    pub fn load(path: &Path) -> CliResult<Self> {
        let file = File::open(path).map_err(|source| CliError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        let table = if is_json {
            Self::from_json_reader(reader)?
        } else {
            Self::from_csv_reader(reader)?
        };
        debug!(
            path = %path.display(),
            columns = table.headers.len(),
            rows = table.rows.len(),
            "Loaded input table"
        );
        Ok(table)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> CliResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let headers = reader.headers()?.iter().map(str::to_string).collect();
        let rows = reader
            .records()
            .map(|record| Ok(record?.iter().map(str::to_string).collect()))
            .collect::<CliResult<Vec<Vec<String>>>>()?;
        Ok(Self { headers, rows })
    }

    pub fn from_json_reader<R: Read>(reader: R) -> CliResult<Self> {
        let json: Value = serde_json::from_reader(reader)?;
        Self::from_json(json)
    }

    fn from_json(json: Value) -> CliResult<Self> {
        match json {
            Value::Array(items) if items.iter().all(Value::is_number) => Ok(Self {
                headers: vec![DEFAULT_COLUMN.to_string()],
                rows: items.iter().map(|v| vec![cell(v)]).collect(),
            }),
            Value::Array(items) => {
                let mut headers: Vec<String> = Vec::new();
                for item in &items {
                    let object = item.as_object().ok_or_else(|| {
                        CliError::UnsupportedInput("array items must be numbers or objects".into())
                    })?;
                    for key in object.keys() {
                        if !headers.contains(key) {
                            headers.push(key.clone());
                        }
                    }
                }
                let rows = items
                    .iter()
                    .map(|item| {
                        headers
                            .iter()
                            .map(|h| item.get(h).map(cell).unwrap_or_default())
                            .collect()
                    })
                    .collect();
                Ok(Self { headers, rows })
            }
            Value::Object(columns) => {
                let mut headers = Vec::with_capacity(columns.len());
                let mut cells: Vec<Vec<String>> = Vec::with_capacity(columns.len());
                for (name, values) in columns {
                    let values = values.as_array().ok_or_else(|| {
                        CliError::UnsupportedInput(format!("column '{}' is not an array", name))
                    })?;
                    headers.push(name);
                    cells.push(values.iter().map(cell).collect());
                }
                let height = cells.iter().map(Vec::len).max().unwrap_or(0);
                let rows = (0..height)
                    .map(|i| {
                        cells
                            .iter()
                            .map(|column| column.get(i).cloned().unwrap_or_default())
                            .collect()
                    })
                    .collect();
                Ok(Self { headers, rows })
            }
            _ => Err(CliError::UnsupportedInput(
                "expected an array or an object of arrays".into(),
            )),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    fn column_index(&self, name: &str) -> CliResult<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| CliError::ColumnNotFound(name.to_string()))
    }

    fn cells<'a>(&'a self, index: usize) -> impl Iterator<Item = &'a str> + 'a {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(String::as_str).unwrap_or(""))
    }

    /// Columns whose non-empty cells all parse as numbers, excluding `skip`.
    pub fn numeric_columns(&self, skip: Option<&str>) -> Vec<String> {
        self.headers
            .iter()
            .enumerate()
            .filter(|(_, name)| Some(name.as_str()) != skip)
            .filter(|(i, _)| {
                let mut cells = self.cells(*i).filter(|c| !c.is_empty()).peekable();
                cells.peek().is_some() && cells.all(|c| c.parse::<f64>().is_ok())
            })
            .map(|(_, name)| name.clone())
            .collect()
    }

    /// Build the series for `column`.
    ///
    /// Blank and non-numeric cells are skipped, as are readings equal to
    /// `missing_marker`. When `timestamp_column` is given, timestamps are
    /// kept for exactly the rows whose reading survives.
    pub fn series(
        &self,
        column: &str,
        timestamp_column: Option<&str>,
        missing_marker: Option<f64>,
    ) -> CliResult<Series> {
        let value_index = self.column_index(column)?;
        let stamp_index = timestamp_column
            .map(|name| self.column_index(name))
            .transpose()?;

        let mut values = Vec::new();
        let mut stamps = Vec::new();
        let mut dropped = 0usize;
        for row in &self.rows {
            let value = match row.get(value_index).and_then(|c| c.parse::<f64>().ok()) {
                Some(v) if Some(v) != missing_marker => v,
                _ => {
                    dropped += 1;
                    continue;
                }
            };
            if let Some(index) = stamp_index {
                let text = row.get(index).map(String::as_str).unwrap_or("");
                stamps.push(Timestamp::parse(text)?);
            }
            values.push(value);
        }
        if dropped > 0 {
            debug!(column, dropped, "Skipped missing or non-numeric readings");
        }

        match stamp_index {
            Some(_) => Ok(Series::with_timestamps(values, stamps)?),
            None => Ok(Series::new(values)),
        }
    }
}

fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
