//! Date helper functions

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use std::fmt::Write;

/// Formats that carry an explicit UTC offset
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M:%S%.f%#z"];

/// Date-time formats without an offset, read as UTC
const DATETIME_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
];

/// Date-only formats, read as midnight UTC
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y"];

/// Parse a post date string
///
/// Accepts RFC 3339 / ISO 8601 timestamps (what the database returns) and
/// the looser forms people write in front-matter. Returns `None` for empty
/// or unrecognised input.
pub fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc());
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }

    None
}

/// Format a post date for display
///
/// `format` uses chrono's strftime syntax. Dates that cannot be parsed, and
/// formats chrono rejects, fall back to the raw string.
///
/// # Examples
/// ```ignore
/// format_date("2024-01-15", "%B %-d, %Y") // -> "January 15, 2024"
/// ```
pub fn format_date(raw: &str, format: &str) -> String {
    let Some(date) = parse_date(raw) else {
        return raw.to_string();
    };

    let mut out = String::new();
    match write!(out, "{}", date.format(format)) {
        Ok(()) => out,
        Err(_) => raw.to_string(),
    }
}

/// ISO 8601 timestamp with millisecond precision and a `Z` suffix
pub fn iso_timestamp(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_date_only() {
        let dt = parse_date("2024-03-01").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
        assert_eq!(parse_date("2024/03/01"), Some(dt));
    }

    #[test]
    fn test_parse_database_timestamps() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 5, 10, 30, 0).unwrap();
        assert_eq!(parse_date("2024-03-05T10:30:00+00:00"), Some(expected));
        assert_eq!(parse_date("2024-03-05T10:30:00.000Z"), Some(expected));
        assert_eq!(parse_date("2024-03-05 12:30:00+02"), Some(expected));
        assert_eq!(parse_date("2024-03-05 10:30:00"), Some(expected));
    }

    #[test]
    fn test_parse_written_out_date() {
        let dt = parse_date("January 5, 2024").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("   "), None);
        assert_eq!(parse_date("someday"), None);
        assert_eq!(parse_date("2024-13-45"), None);
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-01-15", "%B %-d, %Y"), "January 15, 2024");
        assert_eq!(format_date("2024-01-15T08:00:00Z", "%Y/%m/%d"), "2024/01/15");
    }

    #[test]
    fn test_format_unparseable_date_is_verbatim() {
        assert_eq!(format_date("soon", "%B %-d, %Y"), "soon");
        assert_eq!(format_date("", "%B %-d, %Y"), "");
    }

    #[test]
    fn test_iso_timestamp() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(iso_timestamp(&dt), "2024-01-15T10:30:00.000Z");
    }
}
