use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike};

pub const DAYS_PER_WEEK: usize = 7;
pub const HOURS_PER_DAY: usize = 24;

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parse a timestamp string into a wall-clock date-time.
///
/// Accepted forms:
/// * RFC 3339 (`2024-01-01T08:00:00+02:00`); the local wall-clock time is kept
/// * `YYYY-MM-DD HH:MM:SS[.f]` or with a `T` separator
/// * `YYYY-MM-DD HH:MM` or with a `T` separator
/// * `YYYY-MM-DD` (midnight)
///
/// # Example
/// ```
/// use transit_tables::time::parse_timestamp;
/// use chrono::Timelike;
///
/// let ts = parse_timestamp("2024-01-01 23:59:59").unwrap();
/// assert_eq!(ts.hour(), 23);
/// assert!(parse_timestamp("yesterday").is_none());
/// ```
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }

    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Position of `ts` within the week as `(weekday, hour)`, Monday = 0.
pub fn week_bucket(ts: &NaiveDateTime) -> (usize, usize) {
    (
        ts.weekday().num_days_from_monday() as usize,
        ts.hour() as usize,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();

        assert_eq!(parse_timestamp("2024-01-01 08:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-01T08:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-01 08:30"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-01T08:30:00+05:00"), Some(expected));
        assert_eq!(parse_timestamp(" 2024-01-01T08:30:00Z "), Some(expected));
    }

    #[test]
    fn test_parse_date_only_is_midnight() {
        let ts = parse_timestamp("2024-01-07").unwrap();
        assert_eq!((ts.hour(), ts.minute(), ts.second()), (0, 0, 0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("2024-13-01 00:00:00").is_none());
        assert!(parse_timestamp("Monday 10:00").is_none());
    }

    #[test]
    fn test_week_bucket() {
        // 2024-01-01 is a Monday
        let monday = parse_timestamp("2024-01-01 00:00:00").unwrap();
        let sunday = parse_timestamp("2024-01-07 23:59:59").unwrap();
        assert_eq!(week_bucket(&monday), (0, 0));
        assert_eq!(week_bucket(&sunday), (6, 23));
    }
}
