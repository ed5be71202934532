//! Date bounds for parcel history queries.

use std::fmt;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Date format the history endpoint expects (`MM/DD/YYYY`).
pub const QUERY_DATE_FORMAT: &str = "%m/%d/%Y";

/// Input formats accepted when parsing a bound from text.
const INPUT_DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", QUERY_DATE_FORMAT];

// ============================================================================
// Date Bound
// ============================================================================

/// One end of a [`DateRange`].
///
/// Either a calendar date, rendered as `MM/DD/YYYY` on the wire, or a
/// pre-formatted string sent verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateBound {
    /// A calendar date.
    Date(NaiveDate),
    /// Text passed through to the server unchanged.
    Text(String),
}

impl DateBound {
    /// Parses a strict calendar date in `YYYY-MM-DD` or `MM/DD/YYYY` form.
    pub fn parse_date(input: &str) -> Result<NaiveDate, CoreError> {
        let input = input.trim();
        INPUT_DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
            .ok_or_else(|| CoreError::InvalidDate(input.to_string()))
    }

    /// Parses a bound, keeping unrecognized text verbatim.
    pub fn parse(input: &str) -> Self {
        match Self::parse_date(input) {
            Ok(date) => Self::Date(date),
            Err(_) => Self::Text(input.trim().to_string()),
        }
    }

    /// Returns the value sent as a query parameter.
    pub fn to_query_value(&self) -> String {
        match self {
            Self::Date(date) => date.format(QUERY_DATE_FORMAT).to_string(),
            Self::Text(text) => text.clone(),
        }
    }

    /// Returns the calendar date, if this bound is one.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(date) => Some(*date),
            Self::Text(_) => None,
        }
    }
}

impl From<NaiveDate> for DateBound {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl From<&str> for DateBound {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for DateBound {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl fmt::Display for DateBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_value())
    }
}

// ============================================================================
// Date Range
// ============================================================================

/// Delivery-date bounds of a history query. Both ends are inclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// First delivery date to include.
    pub start: DateBound,
    /// Last delivery date to include.
    pub end: DateBound,
}

impl DateRange {
    /// Creates a range from any two bounds.
    pub fn new(start: impl Into<DateBound>, end: impl Into<DateBound>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Creates a range, rejecting calendar dates given in the wrong order.
    ///
    /// Text bounds cannot be compared and are accepted as-is.
    pub fn checked(start: impl Into<DateBound>, end: impl Into<DateBound>) -> Result<Self, CoreError> {
        let range = Self::new(start, end);
        if let (Some(s), Some(e)) = (range.start.as_date(), range.end.as_date()) {
            if s > e {
                return Err(CoreError::InvertedRange {
                    start: range.start.to_query_value(),
                    end: range.end.to_query_value(),
                });
            }
        }
        Ok(range)
    }

    /// The `days` days leading up to and including `today`.
    ///
    /// A window reaching past the earliest representable date starts there.
    pub fn last_days(days: u32, today: NaiveDate) -> Self {
        let start = today
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN);
        Self::new(start, today)
    }

    /// Start bound as sent to the server.
    pub fn start_param(&self) -> String {
        self.start.to_query_value()
    }

    /// End bound as sent to the server.
    pub fn end_param(&self) -> String {
        self.end.to_query_value()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

// ============================================================================
// Tests
// ============================================================================
