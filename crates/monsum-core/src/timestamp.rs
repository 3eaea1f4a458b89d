//! Timestamp parsing and calendar period predicates.
//!
//! Monitor logs are written by different tools over the years, so the
//! timestamp column is not in one fixed format. [`parse_timestamp`] accepts
//! the common ISO-8601 variants. An explicit UTC offset is parsed and then
//! dropped: periods are computed on the wall-clock value written in the file.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use thiserror::Error;

/// The timestamp text was not recognized as a date-time.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unrecognized date-time: {input:?}")]
pub struct DateParseError {
    pub input: String,
}

/// Date-time formats carrying a UTC offset (`+02:00` or `+0200`).
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

/// Date-time formats without an offset.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
];

/// Date-only formats, taken as midnight.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Parses a timestamp field into its wall-clock date-time.
pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime, DateParseError> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.naive_local());
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(text, format) {
            return Ok(dt.naive_local());
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(dt);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Ok(date.and_time(NaiveTime::MIN));
        }
    }

    Err(DateParseError {
        input: text.to_string(),
    })
}

/// Same calendar day (day, month and year all equal).
pub fn same_day(a: &NaiveDateTime, b: &NaiveDateTime) -> bool {
    a.date() == b.date()
}

/// Same ISO week number within the same calendar year.
///
/// The year compared is the calendar year, not the ISO week-numbering year,
/// so the days of ISO week 1 that fall in late December form their own week.
pub fn same_week(a: &NaiveDateTime, b: &NaiveDateTime) -> bool {
    a.iso_week().week() == b.iso_week().week() && a.year() == b.year()
}

/// Same month of the same year.
pub fn same_month(a: &NaiveDateTime, b: &NaiveDateTime) -> bool {
    a.month() == b.month() && a.year() == b.year()
}

/// Same calendar year.
pub fn same_year(a: &NaiveDateTime, b: &NaiveDateTime) -> bool {
    a.year() == b.year()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_parse_iso_without_offset() {
        let parsed = parse_timestamp("2024-01-01T08:00:00").unwrap();
        assert_eq!(parsed, dt(2024, 1, 1, 8, 0, 0));
    }

    #[test]
    fn test_parse_space_separated_with_offset_keeps_wall_clock() {
        let parsed = parse_timestamp("2022-09-24 14:55:28+02:00").unwrap();
        assert_eq!(parsed, dt(2022, 9, 24, 14, 55, 28));
    }

    #[test]
    fn test_parse_compact_offset() {
        let parsed = parse_timestamp("2022-09-24T23:30:00-0500").unwrap();
        assert_eq!(parsed, dt(2022, 9, 24, 23, 30, 0));
    }

    #[test]
    fn test_parse_utc_designator() {
        let parsed = parse_timestamp("2024-01-01T08:00:00Z").unwrap();
        assert_eq!(parsed, dt(2024, 1, 1, 8, 0, 0));
    }

    #[test]
    fn test_parse_fractional_seconds() {
        let parsed = parse_timestamp("2024-01-01 08:00:00.250").unwrap();
        assert_eq!(parsed.date(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(parsed.and_utc().timestamp_subsec_millis(), 250);
    }

    #[test]
    fn test_parse_minute_precision() {
        let parsed = parse_timestamp("2024-01-01 08:15").unwrap();
        assert_eq!(parsed, dt(2024, 1, 1, 8, 15, 0));
    }

    #[test]
    fn test_parse_date_only_is_midnight() {
        let parsed = parse_timestamp("2024-03-15").unwrap();
        assert_eq!(parsed, dt(2024, 3, 15, 0, 0, 0));

        let slashed = parse_timestamp("2024/03/15").unwrap();
        assert_eq!(slashed, parsed);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let parsed = parse_timestamp("  2024-01-01T08:00:00 ").unwrap();
        assert_eq!(parsed, dt(2024, 1, 1, 8, 0, 0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = parse_timestamp("yesterday-ish").unwrap_err();
        assert_eq!(err.input, "yesterday-ish");
        assert!(parse_timestamp("").is_err());
        assert!(parse_timestamp("2024-13-01").is_err());
    }

    #[test]
    fn test_same_day() {
        assert!(same_day(&dt(2024, 1, 1, 0, 0, 0), &dt(2024, 1, 1, 23, 59, 59)));
        assert!(!same_day(&dt(2024, 1, 1, 23, 59, 59), &dt(2024, 1, 2, 0, 0, 0)));
        // Same day-of-month in another month is a different day
        assert!(!same_day(&dt(2024, 1, 5, 8, 0, 0), &dt(2024, 2, 5, 8, 0, 0)));
    }

    #[test]
    fn test_same_week_monday_to_sunday() {
        // Jan 1, 2024 is a Monday
        let monday = dt(2024, 1, 1, 8, 0, 0);
        assert!(same_week(&monday, &dt(2024, 1, 7, 22, 0, 0)));
        assert!(!same_week(&monday, &dt(2024, 1, 8, 0, 0, 0)));
    }

    #[test]
    fn test_same_week_splits_at_calendar_year() {
        // Dec 31, 2024 and Jan 1, 2025 are both in ISO week 1 of 2025
        let december = dt(2024, 12, 31, 12, 0, 0);
        let january = dt(2025, 1, 1, 12, 0, 0);
        assert_eq!(december.iso_week().week(), january.iso_week().week());
        assert!(!same_week(&december, &january));
    }

    #[test]
    fn test_same_month_and_year() {
        assert!(same_month(&dt(2024, 3, 1, 0, 0, 0), &dt(2024, 3, 31, 0, 0, 0)));
        assert!(!same_month(&dt(2024, 3, 1, 0, 0, 0), &dt(2025, 3, 1, 0, 0, 0)));
        assert!(same_year(&dt(2024, 1, 1, 0, 0, 0), &dt(2024, 12, 31, 0, 0, 0)));
        assert!(!same_year(&dt(2024, 12, 31, 0, 0, 0), &dt(2025, 1, 1, 0, 0, 0)));
    }
}
