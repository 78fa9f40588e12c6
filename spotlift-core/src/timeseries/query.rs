//! Inclusive interval lookups.
//!
//! All functions expect their slice sorted by ascending timestamp, which
//! [`TimeSeriesStore`](crate::TimeSeriesStore) guarantees. Both bounds are
//! inclusive. An inverted range yields an empty slice.

use chrono::{DateTime, Utc};

use crate::{SpotEvent, TrafficSample};

fn bounds<T>(
    items: &[T],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    ts_of: impl Fn(&T) -> DateTime<Utc>,
) -> (usize, usize) {
    if start > end {
        return (0, 0);
    }
    let lo = items.partition_point(|it| ts_of(it) < start);
    let hi = items.partition_point(|it| ts_of(it) <= end);
    (lo, hi.max(lo))
}

/// Spot events with `start <= ts <= end`, in ascending timestamp order.
///
/// Returns an empty slice when nothing aired in the range.
#[must_use]
pub fn spots_in_interval(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    spots: &[SpotEvent],
) -> &[SpotEvent] {
    let (lo, hi) = bounds(spots, start, end, |s| s.ts);
    &spots[lo..hi]
}

/// Traffic samples with `start <= ts <= end`, in ascending timestamp order.
#[must_use]
pub fn traffic_in_interval(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    traffic: &[TrafficSample],
) -> &[TrafficSample] {
    let (lo, hi) = bounds(traffic, start, end, |s| s.ts);
    &traffic[lo..hi]
}

/// Sum of traffic values with `start <= ts <= end`.
#[must_use]
pub fn traffic_sum(start: DateTime<Utc>, end: DateTime<Utc>, traffic: &[TrafficSample]) -> f64 {
    traffic_in_interval(start, end, traffic)
        .iter()
        .map(|s| s.value)
        .sum()
}
