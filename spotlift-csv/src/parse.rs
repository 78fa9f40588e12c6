use std::str::FromStr;

use chrono::offset::LocalResult;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

fn localize(naive: NaiveDateTime, tz: Tz) -> Result<DateTime<Utc>, String> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        // Repeated wall time at a DST fall-back: take the first occurrence.
        LocalResult::Ambiguous(first, _) => Ok(first.with_timezone(&Utc)),
        LocalResult::None => Err(format!("{naive} does not exist in {}", tz.name())),
    }
}

/// Parse a timestamp and normalize it to UTC.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` with or without a UTC offset,
/// minute-resolution variants, US `MM/DD/YYYY` forms, and bare dates
/// (midnight). Values without an offset are read as local time in `tz`.
///
/// # Errors
/// Returns a human-readable message if no format matches or the local time
/// falls in a DST gap.
pub fn parse_timestamp(raw: &str, tz: Tz) -> Result<DateTime<Utc>, String> {
    let s = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Ok(dt.with_timezone(&Utc));
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return localize(naive, tz);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        && let Some(naive) = date.and_hms_opt(0, 0, 0)
    {
        return localize(naive, tz);
    }
    Err(format!("unrecognized timestamp {s:?}"))
}

/// Parse a finite visit count.
///
/// # Errors
/// Returns a message for non-numeric, NaN or infinite input.
pub fn parse_value(raw: &str) -> Result<f64, String> {
    let v: f64 = raw
        .trim()
        .parse()
        .map_err(|e| format!("invalid number {raw:?}: {e}"))?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(format!("non-finite number {raw:?}"))
    }
}

/// Parse a spend amount, allowing a leading `$` and thousands separators.
///
/// # Errors
/// Returns a message if the remaining text is not a decimal number.
pub fn parse_decimal(raw: &str) -> Result<Decimal, String> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .map_err(|e| format!("invalid amount {raw:?}: {e}"))
}
