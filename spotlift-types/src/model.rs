//! Input records and derived window values.

use core::fmt;

use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifier of an advertisement creative.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreativeId(pub String);

impl CreativeId {
    /// Construct a creative id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CreativeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CreativeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// One website traffic observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficSample {
    /// Observation time, normalized to UTC.
    pub ts: DateTime<Utc>,
    /// Visit count for this observation.
    pub value: f64,
    /// Traffic source category (e.g. "direct", "search").
    pub source: String,
}

impl TrafficSample {
    /// Build a sample for the given source.
    pub fn new(ts: DateTime<Utc>, value: f64, source: impl Into<String>) -> Self {
        Self {
            ts,
            value,
            source: source.into(),
        }
    }

    /// Build a `direct` sample.
    #[must_use]
    pub fn direct(ts: DateTime<Utc>, value: f64) -> Self {
        Self::new(ts, value, "direct")
    }
}

/// One broadcast airing of a creative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotEvent {
    /// Airing time, normalized to UTC.
    pub ts: DateTime<Utc>,
    /// Creative that aired.
    pub creative_id: CreativeId,
    /// Media spend for this airing.
    pub spend: Decimal,
    /// Program the spot aired in, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
    /// Network code, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_code: Option<String>,
    /// Rotation label, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<String>,
}

impl SpotEvent {
    /// Build a spot without descriptive columns.
    pub fn new(ts: DateTime<Utc>, creative_id: impl Into<String>, spend: Decimal) -> Self {
        Self {
            ts,
            creative_id: CreativeId::new(creative_id),
            spend,
            program: None,
            network_code: None,
            rotation: None,
        }
    }

    /// Key identifying this physical airing.
    #[must_use]
    pub fn key(&self) -> SpotKey {
        SpotKey {
            ts: self.ts,
            creative_id: self.creative_id.clone(),
        }
    }
}

/// Unique key of a spot airing: `(timestamp, creative_id)`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SpotKey {
    /// Airing time.
    pub ts: DateTime<Utc>,
    /// Creative that aired.
    pub creative_id: CreativeId,
}

impl fmt::Display for SpotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.ts.to_rfc3339(), self.creative_id)
    }
}

/// A closed time range `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Inclusive start.
    pub start: DateTime<Utc>,
    /// Inclusive end.
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Window of `len` ending at `end`.
    #[must_use]
    pub fn ending_at(end: DateTime<Utc>, len: TimeDelta) -> Self {
        Self {
            start: end - len,
            end,
        }
    }

    /// Window of `len` starting at `start`.
    #[must_use]
    pub fn starting_at(start: DateTime<Utc>, len: TimeDelta) -> Self {
        Self {
            start,
            end: start + len,
        }
    }

    /// Same width, moved `by` earlier.
    #[must_use]
    pub fn shifted_back(self, by: TimeDelta) -> Self {
        Self {
            start: self.start - by,
            end: self.end - by,
        }
    }

    /// Width of the window.
    #[must_use]
    pub fn len(&self) -> TimeDelta {
        self.end - self.start
    }

    /// True when the window has zero width.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Inclusive membership test.
    #[must_use]
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.start <= ts && ts <= self.end
    }

    /// True when `other` lies entirely within this window.
    #[must_use]
    pub fn covers(&self, other: &Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}
