//! Shared `HH:MM:SS[.sss]` time-of-day grammar used by both the config and
//! event-line parsers.

use chrono::NaiveTime;

use crate::error::{ParseError, ParseResult};

/// Parses a bare (no brackets) `HH:MM:SS` or `HH:MM:SS.sss` time-of-day.
pub fn parse_time_of_day(raw: &str) -> ParseResult<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M:%S%.f")
        .map_err(|_| ParseError::BadTimeStamp(raw.to_string()))
}

/// Parses a `[HH:MM:SS.sss]` bracketed timestamp as it appears at the start
/// of an event-log line.
pub fn parse_bracketed_time(raw: &str) -> ParseResult<NaiveTime> {
    let trimmed = raw
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| ParseError::BadTimeStamp(raw.to_string()))?;
    parse_time_of_day(trimmed)
}

/// Parses the `startDelta` field: a `HH:MM:SS` time-of-day interpreted as a
/// duration equal to `(value - 00:00:00)`, in seconds.
pub fn parse_delta_seconds(raw: &str) -> ParseResult<f64> {
    let t = parse_time_of_day(raw)?;
    let midnight = NaiveTime::from_hms_opt(0, 0, 0).unwrap();
    Ok((t - midnight).num_milliseconds() as f64 / 1000.0)
}
