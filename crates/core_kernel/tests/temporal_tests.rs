//! Unit tests for calendar date normalization
//!
//! Claim CSVs carry dates in whatever layout the exporting system chose.
//! These tests pin down which layouts collapse to a calendar day and which
//! are rejected.

use chrono::NaiveDate;
use core_kernel::temporal::{iso_date_key, parse_calendar_date, TemporalError};
use proptest::prelude::*;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

mod accepted_layouts {
    use super::*;

    #[test]
    fn test_iso_date() {
        assert_eq!(parse_calendar_date("2024-02-29").unwrap(), ymd(2024, 2, 29));
    }

    #[test]
    fn test_iso_date_with_surrounding_whitespace() {
        assert_eq!(parse_calendar_date("  2024-01-05 ").unwrap(), ymd(2024, 1, 5));
    }

    #[test]
    fn test_slash_year_first() {
        assert_eq!(parse_calendar_date("2024/01/05").unwrap(), ymd(2024, 1, 5));
    }

    #[test]
    fn test_us_month_day_year() {
        assert_eq!(parse_calendar_date("01/05/2024").unwrap(), ymd(2024, 1, 5));
    }

    #[test]
    fn test_abbreviated_month_name() {
        assert_eq!(parse_calendar_date("Jan 5, 2024").unwrap(), ymd(2024, 1, 5));
    }

    #[test]
    fn test_full_month_name() {
        assert_eq!(parse_calendar_date("January 5, 2024").unwrap(), ymd(2024, 1, 5));
    }

    #[test]
    fn test_day_first_month_name() {
        assert_eq!(parse_calendar_date("5 Jan 2024").unwrap(), ymd(2024, 1, 5));
    }

    #[test]
    fn test_utc_timestamp() {
        assert_eq!(
            parse_calendar_date("2024-01-05T10:00:00Z").unwrap(),
            ymd(2024, 1, 5)
        );
    }

    #[test]
    fn test_offset_timestamp_is_not_shifted() {
        assert_eq!(
            parse_calendar_date("2024-01-05T01:00:00+09:00").unwrap(),
            ymd(2024, 1, 5)
        );
    }

    #[test]
    fn test_local_datetime_with_t() {
        assert_eq!(
            parse_calendar_date("2024-01-05T08:15:00").unwrap(),
            ymd(2024, 1, 5)
        );
    }

    #[test]
    fn test_local_datetime_with_space() {
        assert_eq!(
            parse_calendar_date("2024-01-05 08:15:00").unwrap(),
            ymd(2024, 1, 5)
        );
    }

    #[test]
    fn test_fractional_seconds() {
        assert_eq!(
            parse_calendar_date("2024-01-05T08:15:00.250").unwrap(),
            ymd(2024, 1, 5)
        );
    }
}

mod rejected_values {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(parse_calendar_date(""), Err(TemporalError::EmptyDate));
    }

    #[test]
    fn test_garbage() {
        assert_eq!(
            parse_calendar_date("not-a-date"),
            Err(TemporalError::UnrecognizedDate("not-a-date".to_string()))
        );
    }

    #[test]
    fn test_impossible_calendar_day() {
        assert!(parse_calendar_date("2023-02-29").is_err());
        assert!(parse_calendar_date("2024-13-01").is_err());
    }

    #[test]
    fn test_error_display_names_value() {
        let error = parse_calendar_date("soon").unwrap_err();
        assert!(error.to_string().contains("soon"));
    }
}

proptest! {
    #[test]
    fn prop_iso_key_round_trips(days in 0i64..40_000) {
        let date = ymd(1970, 1, 1) + chrono::Duration::days(days);
        let key = iso_date_key(date);
        prop_assert_eq!(key.len(), 10);
        prop_assert_eq!(parse_calendar_date(&key).unwrap(), date);
    }
}
