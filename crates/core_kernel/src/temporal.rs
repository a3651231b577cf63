//! Calendar date handling for claim data
//!
//! Claim dates arrive as free text from CSV uploads. Analytics only ever
//! needs the calendar day, so every supported layout is reduced to a
//! [`NaiveDate`] taken exactly as written. No timezone conversion happens:
//! `2024-01-05T23:30:00-08:00` is the 5th, never the 6th.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use thiserror::Error;

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Unrecognized date: '{0}'")]
    UnrecognizedDate(String),

    #[error("Empty date value")]
    EmptyDate,
}

const DATE_LAYOUTS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

const DATETIME_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parses a loosely formatted date string into its calendar date
///
/// Accepted forms, tried in order:
/// - RFC 3339 timestamps (`2024-01-05T10:00:00Z`, `2024-01-05T10:00:00+02:00`)
/// - ISO-like local datetimes (`2024-01-05T10:00:00`, `2024-01-05 10:00`)
/// - Plain dates (`2024-01-05`, `2024/01/05`, `01/05/2024`, `Jan 5, 2024`,
///   `January 5, 2024`, `5 Jan 2024`)
///
/// # Errors
///
/// Returns [`TemporalError::EmptyDate`] for blank input and
/// [`TemporalError::UnrecognizedDate`] when no layout matches.
pub fn parse_calendar_date(value: &str) -> Result<NaiveDate, TemporalError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(TemporalError::EmptyDate);
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.date_naive());
    }

    DATETIME_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(value, layout).ok())
        .map(|datetime| datetime.date())
        .or_else(|| {
            DATE_LAYOUTS
                .iter()
                .find_map(|layout| NaiveDate::parse_from_str(value, layout).ok())
        })
        .ok_or_else(|| TemporalError::UnrecognizedDate(value.to_string()))
}

/// Formats a date as the locale-independent `YYYY-MM-DD` bucket key
pub fn iso_date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_plain_iso_date() {
        assert_eq!(parse_calendar_date("2024-01-05"), Ok(ymd(2024, 1, 5)));
    }

    #[test]
    fn test_rfc3339_keeps_written_day() {
        assert_eq!(
            parse_calendar_date("2024-01-05T23:30:00-08:00"),
            Ok(ymd(2024, 1, 5))
        );
    }

    #[test]
    fn test_blank_is_empty_error() {
        assert_eq!(parse_calendar_date("   "), Err(TemporalError::EmptyDate));
    }

    #[test]
    fn test_iso_key_is_zero_padded() {
        assert_eq!(iso_date_key(ymd(2024, 3, 7)), "2024-03-07");
    }
}
