//! Shared timestamp and calendar helpers for store parsing and briefings.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde_json::Value as JsonValue;

use crate::core::error::DaisError;

/// Parse a loosely-typed timestamp field into a UTC instant.
///
/// Accepts RFC 3339 strings (`Z` suffix accepted as UTC, other offsets
/// normalized to UTC), naive datetimes (assumed UTC) and bare dates.
/// Missing, non-string or unparseable values fall back to the Unix epoch.
pub fn parse_timestamp(value: Option<&JsonValue>) -> DateTime<Utc> {
    match value {
        Some(JsonValue::String(raw)) => parse_timestamp_str(raw),
        _ => DateTime::UNIX_EPOCH,
    }
}

pub fn parse_timestamp_str(raw: &str) -> DateTime<Utc> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Utc);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return naive.and_utc();
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_time(NaiveTime::MIN).and_utc();
    }
    DateTime::UNIX_EPOCH
}

/// Parse a `YYYY-MM-DD` command-line date argument.
pub fn parse_cli_date(raw: &str) -> Result<NaiveDate, DaisError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| DaisError::InvalidArgument(format!("invalid date '{raw}', expected YYYY-MM-DD")))
}

/// ISO weekday of a date (1 = Monday .. 7 = Sunday).
pub fn iso_weekday(date: NaiveDate) -> u32 {
    date.weekday().number_from_monday()
}

/// Whole days elapsed from `from` to `to`, floored at zero.
pub fn days_since(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days().max(0)
}
