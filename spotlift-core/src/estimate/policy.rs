use chrono::TimeDelta;

use crate::timeseries::util::to_delta;
use crate::{AttributionConfig, SpotLiftError};

/// Attribution windows in chrono units, derived once from [`AttributionConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowPolicy {
    /// Baseline window width.
    pub baseline: TimeDelta,
    /// Lift window width and spot span.
    pub lift: TimeDelta,
    /// Backward step of the baseline search.
    pub shift_step: TimeDelta,
    /// Gap after an airing before other spots count as overlaps.
    pub overlap_offset: TimeDelta,
    /// Maximum number of backward steps.
    pub max_shifts: u64,
    /// Maximum lookback in whole seconds, for error reporting.
    pub max_lookback_secs: u64,
}

impl WindowPolicy {
    /// Validate a config and convert its durations.
    ///
    /// # Errors
    /// Returns `SpotLiftError::InvalidArg` if the config is inconsistent or a
    /// duration is outside chrono's range.
    pub fn from_config(cfg: &AttributionConfig) -> Result<Self, SpotLiftError> {
        cfg.validate()?;
        Ok(Self {
            baseline: to_delta("baseline_window", cfg.baseline_window)?,
            lift: to_delta("lift_window", cfg.lift_window)?,
            shift_step: to_delta("shift_step", cfg.shift_step)?,
            overlap_offset: to_delta("overlap_offset", cfg.overlap_offset)?,
            max_shifts: cfg.max_shifts(),
            max_lookback_secs: cfg.max_lookback.as_secs(),
        })
    }
}

impl Default for WindowPolicy {
    fn default() -> Self {
        Self {
            baseline: TimeDelta::minutes(5),
            lift: TimeDelta::minutes(5),
            shift_step: TimeDelta::minutes(1),
            overlap_offset: TimeDelta::seconds(1),
            max_shifts: 60,
            max_lookback_secs: 3600,
        }
    }
}
