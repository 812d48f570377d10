//! Time utilities: epoch millis conversion, wire timestamp parsing, formatting.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};

/// Values at or below this are read as epoch seconds rather than millis.
const SECONDS_CUTOFF: i64 = 99_999_999_999;

pub fn now_millis() -> i64 {
    Local::now().timestamp_millis()
}

pub fn millis_to_local(ms: i64) -> Option<DateTime<Local>> {
    Local.timestamp_millis_opt(ms).single()
}

pub fn format_millis(ms: i64) -> String {
    millis_to_local(ms)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "--".to_string())
}

/// Parse the backend's string timestamp into epoch millis.
///
/// Accepts a numeric string (millis, or seconds when small enough),
/// RFC 3339, or `YYYY-MM-DD HH:MM:SS` interpreted as local time.
pub fn parse_wire_timestamp(s: &str) -> Option<i64> {
    let s = s.trim();

    if let Ok(n) = s.parse::<i64>() {
        return if n.unsigned_abs() <= SECONDS_CUTOFF as u64 {
            n.checked_mul(1000)
        } else {
            Some(n)
        };
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }

    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .ok()
        .and_then(|naive| naive.and_local_timezone(Local).single())
        .map(|dt| dt.timestamp_millis())
}

/// Parse a `--since` value: epoch millis or a `YYYY-MM-DD` date (local midnight).
pub fn parse_since(s: &str) -> AppResult<i64> {
    if let Ok(n) = s.trim().parse::<i64>() {
        return Ok(n);
    }

    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .and_then(|naive| naive.and_local_timezone(Local).single())
        .map(|dt| dt.timestamp_millis())
        .ok_or_else(|| AppError::InvalidTimestamp(s.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_millis_pass_through() {
        assert_eq!(parse_wire_timestamp("1717000000000"), Some(1_717_000_000_000));
    }

    #[test]
    fn numeric_seconds_are_scaled() {
        assert_eq!(parse_wire_timestamp("1717000000"), Some(1_717_000_000_000));
    }

    #[test]
    fn rfc3339_is_accepted() {
        assert_eq!(
            parse_wire_timestamp("2024-05-29T16:26:40Z"),
            Some(1_717_000_000_000)
        );
    }

    #[test]
    fn extreme_numbers_do_not_overflow() {
        assert_eq!(
            parse_wire_timestamp("-9223372036854775808"),
            Some(i64::MIN)
        );
        assert_eq!(parse_wire_timestamp("9223372036854775807"), Some(i64::MAX));
        assert_eq!(parse_wire_timestamp("-1717000000"), Some(-1_717_000_000_000));
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(parse_wire_timestamp("yesterday"), None);
        assert!(parse_since("yesterday").is_err());
    }

    #[test]
    fn since_accepts_millis() {
        assert_eq!(parse_since("42").unwrap(), 42);
    }
}
