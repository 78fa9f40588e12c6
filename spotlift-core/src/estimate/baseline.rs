use crate::timeseries::query::{spots_in_interval, traffic_in_interval};
use crate::timeseries::util::floor_to_minute;
use crate::{SpotEvent, SpotLiftError, TimeWindow, TrafficSample, WindowPolicy};

/// Outcome of the baseline search for one spot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaselineEstimate {
    /// Resolved window, free of any spot airing.
    pub window: TimeWindow,
    /// Mean traffic in `window`; `None` when the window holds no samples.
    pub mean: Option<f64>,
    /// Number of samples averaged.
    pub samples: usize,
    /// Backward steps taken before the window was conflict-free.
    pub shifts: u64,
}

/// Find the conflict-free baseline window preceding `spot`.
///
/// Starts from `[floor(spot.ts) - baseline, floor(spot.ts)]` and steps back by
/// `shift_step` while any spot (the subject included) airs inside it.
///
/// # Errors
/// Returns `SpotLiftError::BaselineUnresolved` once `max_shifts` steps have
/// been taken without finding a clear window.
pub fn resolve_baseline_window(
    spot: &SpotEvent,
    spots: &[SpotEvent],
    policy: &WindowPolicy,
) -> Result<(TimeWindow, u64), SpotLiftError> {
    let mut window = TimeWindow::ending_at(floor_to_minute(spot.ts), policy.baseline);
    let mut shifts: u64 = 0;
    while !spots_in_interval(window.start, window.end, spots).is_empty() {
        if shifts >= policy.max_shifts {
            return Err(SpotLiftError::BaselineUnresolved {
                spot: spot.key().to_string(),
                lookback_secs: policy.max_lookback_secs,
            });
        }
        window = window.shifted_back(policy.shift_step);
        shifts += 1;
    }
    Ok((window, shifts))
}

/// Mean traffic over the conflict-free window preceding `spot`.
///
/// # Errors
/// Propagates `SpotLiftError::BaselineUnresolved` from the window search.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        target = "spotlift::baseline",
        level = "trace",
        skip_all,
        fields(spot = %spot.key()),
    )
)]
pub fn calc_baseline(
    spot: &SpotEvent,
    traffic: &[TrafficSample],
    spots: &[SpotEvent],
    policy: &WindowPolicy,
) -> Result<BaselineEstimate, SpotLiftError> {
    let (window, shifts) = resolve_baseline_window(spot, spots, policy)?;
    let in_window = traffic_in_interval(window.start, window.end, traffic);
    let mean = if in_window.is_empty() {
        None
    } else {
        let total: f64 = in_window.iter().map(|s| s.value).sum();
        Some(total / in_window.len() as f64)
    };
    #[cfg(feature = "tracing")]
    tracing::trace!(shifts, samples = in_window.len(), ?mean, "baseline resolved");
    Ok(BaselineEstimate {
        window,
        mean,
        samples: in_window.len(),
        shifts,
    })
}
