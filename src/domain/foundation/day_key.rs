//! Calendar-day key used for per-day records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{Timestamp, ValidationError};

const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

/// A calendar date rendered as `YYYY-MM-DD`.
///
/// This is the lookup and uniqueness key for daily devotionals. The string
/// form sorts lexicographically in date order. Parsing is strict: a full
/// timestamp is rejected rather than truncated, so a row can never be keyed
/// by anything other than the derived day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DayKey(NaiveDate);

impl DayKey {
    /// Day key for the UTC calendar date of the given instant.
    pub fn from_timestamp(ts: &Timestamp) -> Self {
        Self(ts.as_datetime().date_naive())
    }

    /// Creates a day key from a date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Creates a day key from year, month and day components.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, ValidationError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    "date",
                    format!("{:04}-{:02}-{:02} is not a calendar date", year, month, day),
                )
            })
    }

    /// Parses a `YYYY-MM-DD` string.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        if value.len() != 10 {
            return Err(ValidationError::invalid_format(
                "date",
                format!("expected YYYY-MM-DD, got '{}'", value),
            ));
        }
        let key = NaiveDate::parse_from_str(value, DAY_KEY_FORMAT)
            .map(Self)
            .map_err(|e| ValidationError::invalid_format("date", format!("'{}': {}", value, e)))?;
        // chrono accepts signs and unpadded fields; only the canonical form is a key.
        if key.to_string() != value {
            return Err(ValidationError::invalid_format(
                "date",
                format!("expected YYYY-MM-DD, got '{}'", value),
            ));
        }
        Ok(key)
    }

    /// Returns the inner date.
    pub fn as_date(&self) -> NaiveDate {
        self.0
    }

    /// The day before this one.
    pub fn previous(&self) -> Option<Self> {
        self.0.pred_opt().map(Self)
    }

    /// The day after this one.
    pub fn next(&self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DAY_KEY_FORMAT))
    }
}

impl FromStr for DayKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for DayKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DayKey> for String {
    fn from(key: DayKey) -> Self {
        key.to_string()
    }
}
