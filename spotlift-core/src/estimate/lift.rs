use crate::timeseries::query::{spots_in_interval, traffic_sum};
use crate::{LiftBreakdown, OverlapSegment, SpotEvent, TimeWindow, TrafficSample, WindowPolicy};

/// Other spots airing inside `spot`'s lift window, ascending by timestamp.
///
/// The range is `(spot.ts + overlap_offset, spot.ts + lift]`. Only spots
/// airing strictly more than `overlap_offset` after the subject count.
#[must_use]
pub fn overlapping_spots<'a>(
    spot: &SpotEvent,
    spots: &'a [SpotEvent],
    policy: &WindowPolicy,
) -> &'a [SpotEvent] {
    let window = TimeWindow::starting_at(spot.ts, policy.lift);
    let after = spot.ts + policy.overlap_offset;
    let candidates = spots_in_interval(after, window.end, spots);
    let open = candidates.partition_point(|o| o.ts <= after);
    &candidates[open..]
}

/// Split `spot`'s lift-window traffic between it and overlapping spots.
///
/// Overlaps are walked latest-first. Each one opens a segment
/// `[overlap.ts, previous start]`; the segment's traffic is split in equal
/// shares between the subject and the `n` spots concurrently airing over it,
/// so `n / (n + 1)` of it is subtracted. `n` is measured once, over the latest
/// segment, and held for the rest of the chain.
#[must_use]
pub fn lift_breakdown(
    spot: &SpotEvent,
    traffic: &[TrafficSample],
    spots: &[SpotEvent],
    policy: &WindowPolicy,
) -> LiftBreakdown {
    let window = TimeWindow::starting_at(spot.ts, policy.lift);
    let raw_sum = traffic_sum(window.start, window.end, traffic);
    let overlaps = overlapping_spots(spot, spots, policy);

    let Some(latest) = overlaps.last() else {
        return LiftBreakdown {
            window,
            raw_sum,
            subtracted_overlap: 0.0,
            segments: Vec::new(),
        };
    };

    let densest = TimeWindow {
        start: latest.ts,
        end: window.end,
    };
    let concurrency = overlaps
        .iter()
        .filter(|o| TimeWindow::starting_at(o.ts, policy.lift).covers(&densest))
        .count();
    let n = concurrency as f64;

    let mut segments = Vec::with_capacity(overlaps.len());
    let mut subtracted_overlap = 0.0;
    let mut overlap_end = window.end;
    for overlap in overlaps.iter().rev() {
        let overlap_start = overlap.ts;
        let segment_traffic = traffic_sum(overlap_start, overlap_end, traffic);
        let subtracted = segment_traffic * n / (1.0 + n);
        subtracted_overlap += subtracted;
        segments.push(OverlapSegment {
            start: overlap_start,
            end: overlap_end,
            traffic: segment_traffic,
            concurrency,
            credited: segment_traffic - subtracted,
            subtracted,
        });
        overlap_end = overlap_start;
    }

    #[cfg(feature = "tracing")]
    tracing::trace!(
        target: "spotlift::lift",
        spot = %spot.key(),
        overlaps = overlaps.len(),
        concurrency,
        raw_sum,
        subtracted_overlap,
        "overlap chain resolved"
    );

    LiftBreakdown {
        window,
        raw_sum,
        subtracted_overlap,
        segments,
    }
}

/// Net lift for `spot`: `raw_sum - subtracted_overlap - baseline`.
///
/// Returns `None` when `baseline` is `None`.
#[must_use]
pub fn calc_lift(
    spot: &SpotEvent,
    traffic: &[TrafficSample],
    spots: &[SpotEvent],
    baseline: Option<f64>,
    policy: &WindowPolicy,
) -> Option<f64> {
    lift_breakdown(spot, traffic, spots, policy).lift(baseline)
}
