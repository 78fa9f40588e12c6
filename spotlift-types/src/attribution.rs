//! Attribution outputs for individual spots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{CreativeId, SpotKey, TimeWindow};

/// A slice of a lift window shared with one or more later spots.
///
/// Segments are emitted latest-first, matching the order in which the overlap
/// chain is walked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlapSegment {
    /// Airing time of the overlapping spot that opens this segment.
    pub start: DateTime<Utc>,
    /// End of the segment (the previous segment's start, or the lift window end).
    pub end: DateTime<Utc>,
    /// Raw traffic summed over `[start, end]`.
    pub traffic: f64,
    /// Number of other spots sharing the segment.
    pub concurrency: usize,
    /// Share of `traffic` kept by the spot being attributed.
    pub credited: f64,
    /// Share of `traffic` handed to the concurrent spots.
    pub subtracted: f64,
}

/// How a spot's raw lift-window traffic was split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiftBreakdown {
    /// The lift window `[airing, airing + lift_window]`.
    pub window: TimeWindow,
    /// Unmodified traffic sum over the window.
    pub raw_sum: f64,
    /// Total traffic credited to overlapping spots.
    pub subtracted_overlap: f64,
    /// Per-segment split, latest segment first. Empty when nothing overlaps.
    pub segments: Vec<OverlapSegment>,
}

impl LiftBreakdown {
    /// Apply a baseline: `raw_sum - subtracted_overlap - baseline`.
    ///
    /// An undefined baseline yields an undefined lift.
    #[must_use]
    pub fn lift(&self, baseline: Option<f64>) -> Option<f64> {
        baseline.map(|b| self.raw_sum - self.subtracted_overlap - b)
    }

    /// True when no other spot aired inside the window.
    #[must_use]
    pub fn is_isolated(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Baseline and lift computed for one spot airing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributionResult {
    /// Creative that aired.
    pub creative_id: CreativeId,
    /// Airing time.
    pub ts: DateTime<Utc>,
    /// Resolved conflict-free baseline window.
    pub baseline_window: TimeWindow,
    /// Mean traffic in the baseline window; `None` if it held no samples.
    pub baseline: Option<f64>,
    /// Net lift; `None` whenever `baseline` is `None`.
    pub lift: Option<f64>,
    /// Lift-window accounting.
    pub breakdown: LiftBreakdown,
}

impl AttributionResult {
    /// Key of the spot this result belongs to.
    #[must_use]
    pub fn key(&self) -> SpotKey {
        SpotKey {
            ts: self.ts,
            creative_id: self.creative_id.clone(),
        }
    }
}
