//! Lenient date parsing for backend date fields.
//!
//! Backends encode dates inconsistently per deployment and per field: some
//! emit ISO 8601 timestamps, others emit UNIX epoch seconds. Parsing is an
//! ordered sequence of attempts; the first success wins and total failure is
//! `None`, never an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use search_model::Timestamp;

/// Date-time layouts carrying an explicit offset without a colon (`+0200`).
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M%z"];

/// Date-time layouts without an offset; interpreted as UTC.
const LOCAL_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parse a raw date value.
///
/// 1. ISO 8601 (with or without fractional seconds and offset)
/// 2. decimal integer as whole seconds since the UNIX epoch, optionally
///    with an all-zero fraction (`1609459200.0`)
/// 3. otherwise `None`
pub fn parse_date(value: &str) -> Option<Timestamp> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    parse_iso8601(trimmed).or_else(|| parse_epoch_seconds(trimmed))
}

/// Parse an ISO 8601 timestamp or calendar date.
///
/// All-digit input is never ISO here (`2021` is epoch seconds, not a year).
pub fn parse_iso8601(value: &str) -> Option<Timestamp> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    try_parse_rfc3339(trimmed)
        .or_else(|| try_parse_with_offset(trimmed))
        .or_else(|| try_parse_local(trimmed))
        .or_else(|| try_parse_calendar_date(trimmed))
}

/// Parse a signed decimal integer as epoch seconds.
///
/// JSON numbers stringify floats with a fraction, so `1609459200.0` is
/// accepted. A non-zero fraction or exponent notation is not.
pub fn parse_epoch_seconds(value: &str) -> Option<Timestamp> {
    let value = value.trim();
    let integral = match value.split_once('.') {
        Some((whole, fraction))
            if !fraction.is_empty() && fraction.bytes().all(|b| b == b'0') =>
        {
            whole
        }
        Some(_) => return None,
        None => value,
    };
    let seconds: i64 = integral.parse().ok()?;
    let millis = seconds.checked_mul(1000)?;
    DateTime::<Utc>::from_timestamp_millis(millis)
}

fn try_parse_rfc3339(value: &str) -> Option<Timestamp> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn try_parse_with_offset(value: &str) -> Option<Timestamp> {
    OFFSET_FORMATS.iter().find_map(|format| {
        DateTime::parse_from_str(value, format)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    })
}

fn try_parse_local(value: &str) -> Option<Timestamp> {
    // `Z` on a layout RFC 3339 rejects, e.g. minutes-only `2021-01-01T10:00Z`.
    let value = value
        .strip_suffix('Z')
        .or_else(|| value.strip_suffix('z'))
        .unwrap_or(value);
    LOCAL_FORMATS.iter().find_map(|format| {
        NaiveDateTime::parse_from_str(value, format)
            .ok()
            .map(|dt| dt.and_utc())
    })
}

fn try_parse_calendar_date(value: &str) -> Option<Timestamp> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> Timestamp {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_rfc3339() {
        assert_eq!(parse_date("2021-01-01T00:00:00Z"), Some(utc(2021, 1, 1, 0, 0, 0)));
        assert_eq!(
            parse_date("2021-01-01T02:00:00+02:00"),
            Some(utc(2021, 1, 1, 0, 0, 0))
        );
    }

    #[test]
    fn test_fractional_seconds() {
        let parsed = parse_date("2021-06-15T12:30:45.250Z").unwrap();
        assert_eq!(parsed.timestamp_millis(), utc(2021, 6, 15, 12, 30, 45).timestamp_millis() + 250);
    }

    #[test]
    fn test_offset_without_colon() {
        assert_eq!(
            parse_date("2021-01-01T05:30:00+0530"),
            Some(utc(2021, 1, 1, 0, 0, 0))
        );
    }

    #[test]
    fn test_local_datetime_is_utc() {
        assert_eq!(parse_date("2021-03-04T10:11:12"), Some(utc(2021, 3, 4, 10, 11, 12)));
        assert_eq!(parse_date("2021-03-04T10:11"), Some(utc(2021, 3, 4, 10, 11, 0)));
        assert_eq!(parse_date("2021-03-04T10:11Z"), Some(utc(2021, 3, 4, 10, 11, 0)));
    }

    #[test]
    fn test_calendar_date() {
        assert_eq!(parse_date("2021-03-04"), Some(utc(2021, 3, 4, 0, 0, 0)));
        assert_eq!(parse_date("2021-02-30"), None);
    }

    #[test]
    fn test_epoch_seconds() {
        assert_eq!(parse_date("1609459200"), Some(utc(2021, 1, 1, 0, 0, 0)));
        assert_eq!(parse_date("0"), Some(utc(1970, 1, 1, 0, 0, 0)));
        assert_eq!(parse_date("-86400"), Some(utc(1969, 12, 31, 0, 0, 0)));
        assert_eq!(parse_date("  1609459200  "), Some(utc(2021, 1, 1, 0, 0, 0)));
    }

    #[test]
    fn test_integral_float_epoch() {
        assert_eq!(parse_date("1609459200.0"), Some(utc(2021, 1, 1, 0, 0, 0)));
        assert_eq!(parse_date("-86400.000"), Some(utc(1969, 12, 31, 0, 0, 0)));
        assert_eq!(parse_date("1609459200.5"), None);
        assert_eq!(parse_date("1609459200."), None);
        assert_eq!(parse_date("1.6094592e9"), None);
    }

    #[test]
    fn test_digits_only_is_never_a_year() {
        assert_eq!(parse_date("2021"), Some(utc(1970, 1, 1, 0, 33, 41)));
    }

    #[test]
    fn test_unparseable() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("   "), None);
        assert_eq!(parse_date("not-a-date"), None);
        assert_eq!(parse_date("12.5"), None);
        assert_eq!(parse_date("2021/01/01"), None);
    }

    #[test]
    fn test_epoch_overflow() {
        assert_eq!(parse_date("9223372036854775807"), None);
        assert_eq!(parse_date("99999999999999999999"), None);
    }
}
