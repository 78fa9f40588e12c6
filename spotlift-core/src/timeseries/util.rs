//! Shared helpers for timestamp arithmetic.

use chrono::{DateTime, TimeDelta, Utc};

use crate::SpotLiftError;

const MINUTE: i64 = 60;

/// Truncate a timestamp to the start of its minute.
#[must_use]
pub fn floor_to_minute(ts: DateTime<Utc>) -> DateTime<Utc> {
    let secs = ts.timestamp();
    let floored = secs - secs.rem_euclid(MINUTE);
    DateTime::from_timestamp(floored, 0).unwrap_or(ts)
}

/// Convert a configured duration into a chrono delta.
///
/// # Errors
/// Returns `SpotLiftError::InvalidArg` if the duration exceeds chrono's range.
pub fn to_delta(label: &str, d: std::time::Duration) -> Result<TimeDelta, SpotLiftError> {
    TimeDelta::from_std(d)
        .map_err(|e| SpotLiftError::InvalidArg(format!("{label} out of range: {e}")))
}
