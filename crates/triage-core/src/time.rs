//! Time normalization.
//!
//! The service compares timestamps in UTC only. Everything handed to it, and
//! everything read back from it, goes through this module.

use chrono::{
    DateTime, Duration, Local, LocalResult, NaiveDate, NaiveDateTime, SecondsFormat, SubsecRound,
    TimeZone, Utc,
};

use crate::Result;
use crate::error::{InvalidInputError, PreconditionError};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Convert a zoned time to UTC.
///
/// The conversion is applied unconditionally, also for values already in UTC.
pub fn normalize<Tz: TimeZone>(time: &DateTime<Tz>) -> DateTime<Utc> {
    time.with_timezone(&Utc)
}

/// Interpret a wall-clock time in the system's local time zone.
///
/// Ambiguous times (repeated by a DST change) resolve to the earlier instant.
///
/// # Errors
///
/// Returns [`PreconditionError::NonexistentLocalTime`] for wall-clock times
/// skipped by a DST change.
pub fn from_local(naive: NaiveDateTime) -> Result<DateTime<Utc>> {
    from_zone(&Local, naive)
}

/// Interpret a wall-clock time in an explicit zone.
pub fn from_zone<Tz: TimeZone>(zone: &Tz, naive: NaiveDateTime) -> Result<DateTime<Utc>> {
    match zone.from_local_datetime(&naive) {
        LocalResult::Single(time) => Ok(normalize(&time)),
        LocalResult::Ambiguous(earlier, _) => Ok(normalize(&earlier)),
        LocalResult::None => Err(PreconditionError::NonexistentLocalTime(naive).into()),
    }
}

/// Parse a time given by a caller.
///
/// Accepts RFC 3339 (`2024-03-01T12:00:00+01:00`), a naive date-time
/// (`2024-03-01 12:00:00`, `2024-03-01T12:00`) or a bare date
/// (`2024-03-01`, meaning midnight). Naive forms are local time.
pub fn parse_caller_time(input: &str) -> Result<DateTime<Utc>> {
    parse_caller_time_in(&Local, input)
}

/// Like [`parse_caller_time`], reading naive forms in `zone`.
pub fn parse_caller_time_in<Tz: TimeZone>(zone: &Tz, input: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(time) = DateTime::parse_from_rfc3339(input) {
        return Ok(normalize(&time));
    }
    if let Some(naive) = parse_naive(input) {
        return from_zone(zone, naive);
    }
    Err(InvalidInputError::Timestamp {
        value: input.to_string(),
        reason: "expected RFC 3339, 'YYYY-MM-DD HH:MM[:SS]' or 'YYYY-MM-DD'".to_string(),
    }
    .into())
}

fn parse_naive(input: &str) -> Option<NaiveDateTime> {
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Parse a timestamp reported by the service.
///
/// The service sends RFC 3339 in UTC; offset-less values are read as UTC.
/// Returns `None` for empty or unrecognized text.
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    DateTime::parse_from_rfc3339(input)
        .map(|time| normalize(&time))
        .ok()
        .or_else(|| parse_naive(input).map(|naive| naive.and_utc()))
}

/// Format a UTC time as a search continuation token.
///
/// Tokens carry whole seconds. A fractional second is rounded up, so the
/// token never falls before `time`.
pub fn format_offset(time: DateTime<Utc>) -> String {
    let whole = time.trunc_subsecs(0);
    let time = if whole < time {
        whole.checked_add_signed(Duration::seconds(1)).unwrap_or(whole)
    } else {
        whole
    };
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}
