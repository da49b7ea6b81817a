//! Sample timestamps
//!
//! Upstream feeds hand over either raw epoch numbers or formatted date-times.
//! Both are kept as given; [`Timestamp::date`] resolves either to a calendar
//! day (epochs are read as UTC).

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SeriesError};

/// Output format for date-time timestamps.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Formats accepted by [`Timestamp::parse`], tried in order after RFC 3339.
const PARSE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%m/%d/%y %H:%M",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
];

/// A point in time attached to one sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    /// Seconds since the Unix epoch, fractional part allowed
    Epoch(f64),
    /// Calendar date-time with sub-second precision
    DateTime(#[serde(with = "datetime_format")] NaiveDateTime),
}

impl Timestamp {
    /// Parse a timestamp from text.
    ///
    /// Bare numbers are epochs; otherwise RFC 3339 and a handful of common
    /// logger formats are tried.
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        if let Ok(epoch) = text.parse::<f64>() {
            if epoch.is_finite() {
                return Ok(Self::Epoch(epoch));
            }
            return Err(SeriesError::InvalidTimestamp(text.to_string()));
        }
        parse_datetime(text).map(Self::DateTime)
    }

    /// Resolve to a naive date-time; epochs are interpreted as UTC.
    pub fn to_datetime(&self) -> Result<NaiveDateTime> {
        match *self {
            Self::DateTime(dt) => Ok(dt),
            Self::Epoch(epoch) => {
                if !epoch.is_finite() {
                    return Err(SeriesError::InvalidTimestamp(epoch.to_string()));
                }
                let secs = epoch.floor();
                let nanos = (((epoch - secs) * 1e9).round() as u32).min(999_999_999);
                DateTime::from_timestamp(secs as i64, nanos)
                    .map(|dt| dt.naive_utc())
                    .ok_or_else(|| SeriesError::InvalidTimestamp(epoch.to_string()))
            }
        }
    }

    /// Calendar date containing this timestamp.
    pub fn date(&self) -> Result<NaiveDate> {
        self.to_datetime().map(|dt| dt.date())
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(dt: NaiveDateTime) -> Self {
        Self::DateTime(dt)
    }
}

impl From<f64> for Timestamp {
    fn from(epoch: f64) -> Self {
        Self::Epoch(epoch)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Epoch(epoch) => write!(f, "{}", epoch),
            Self::DateTime(dt) => write!(f, "{}", dt.format(DATETIME_FORMAT)),
        }
    }
}

fn parse_datetime(text: &str) -> Result<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.naive_utc());
    }
    for format in PARSE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| SeriesError::InvalidTimestamp(text.to_string()))
}

mod datetime_format {
    use chrono::NaiveDateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::DATETIME_FORMAT;

    pub fn serialize<S: Serializer>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&dt.format(DATETIME_FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        super::parse_datetime(&text).map_err(de::Error::custom)
    }
}
