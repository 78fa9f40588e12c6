use std::time::Duration;

use spotlift_core::{
    AttributionConfig, SpotEvent, SpotLiftError, TimeSeriesStore, TrafficSample, WindowPolicy,
    overlapping_spots,
};

/// Orchestrator that attributes traffic to every spot in a store.
#[derive(Debug, Clone)]
pub struct SpotLift {
    pub(crate) cfg: AttributionConfig,
    pub(crate) policy: WindowPolicy,
}

/// Builder for constructing a `SpotLift` orchestrator with custom configuration.
pub struct SpotLiftBuilder {
    cfg: AttributionConfig,
}

impl Default for SpotLiftBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SpotLiftBuilder {
    /// Create a new builder with the default policy.
    ///
    /// Defaults: 5 minute baseline and lift windows, 1 minute search step,
    /// 60 minute maximum lookback, 1 second overlap offset, `direct` traffic.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cfg: AttributionConfig::default(),
        }
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: AttributionConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Width of the pre-airing baseline window.
    ///
    /// Wider windows smooth noise but are harder to keep clear of other
    /// airings, so they shift back further on busy schedules.
    #[must_use]
    pub const fn baseline_window(mut self, d: Duration) -> Self {
        self.cfg.baseline_window = d;
        self
    }

    /// Width of the post-airing lift window.
    ///
    /// This is also the span each spot occupies when checked against other
    /// spots' lift windows, so it controls how often overlaps occur.
    #[must_use]
    pub const fn lift_window(mut self, d: Duration) -> Self {
        self.cfg.lift_window = d;
        self
    }

    /// Step by which the baseline window moves back on each conflict.
    #[must_use]
    pub const fn shift_step(mut self, d: Duration) -> Self {
        self.cfg.shift_step = d;
        self
    }

    /// Maximum total backward shift of the baseline window.
    ///
    /// Spots that cannot find a clear window within this lookback are reported
    /// as `BaselineUnresolved` and skipped.
    #[must_use]
    pub const fn max_lookback(mut self, d: Duration) -> Self {
        self.cfg.max_lookback = d;
        self
    }

    /// Gap after an airing before another spot counts as an overlap.
    #[must_use]
    pub const fn overlap_offset(mut self, d: Duration) -> Self {
        self.cfg.overlap_offset = d;
        self
    }

    /// Traffic source kept when building a store.
    #[must_use]
    pub fn traffic_source(mut self, source: impl Into<String>) -> Self {
        self.cfg.traffic_source = source.into();
        self
    }

    /// Build the orchestrator.
    ///
    /// # Errors
    /// Returns `SpotLiftError::InvalidArg` if the configuration is inconsistent.
    pub fn build(self) -> Result<SpotLift, SpotLiftError> {
        let policy = WindowPolicy::from_config(&self.cfg)?;
        Ok(SpotLift {
            cfg: self.cfg,
            policy,
        })
    }
}

impl SpotLift {
    /// Start building a new `SpotLift` instance.
    ///
    /// ```rust,ignore
    /// let engine = spotlift::SpotLift::builder()
    ///     .lift_window(std::time::Duration::from_secs(300))
    ///     .traffic_source("direct")
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> SpotLiftBuilder {
        SpotLiftBuilder::new()
    }

    /// Active configuration.
    #[must_use]
    pub const fn config(&self) -> &AttributionConfig {
        &self.cfg
    }

    /// Window lengths and bounds derived from the configuration.
    #[must_use]
    pub const fn policy(&self) -> &WindowPolicy {
        &self.policy
    }

    /// Build a store holding only the configured traffic source.
    ///
    /// # Errors
    /// Returns `SpotLiftError::Parse` if a traffic value is not finite.
    pub fn store(
        &self,
        traffic: Vec<TrafficSample>,
        spots: Vec<SpotEvent>,
    ) -> Result<TimeSeriesStore, SpotLiftError> {
        Ok(TimeSeriesStore::new(traffic, spots)?.retain_source(&self.cfg.traffic_source))
    }

    /// Spots airing inside `spot`'s lift window, for rendering overlap markers.
    #[must_use]
    pub fn overlaps_for<'a>(&self, spot: &SpotEvent, store: &'a TimeSeriesStore) -> &'a [SpotEvent] {
        overlapping_spots(spot, store.spots(), &self.policy)
    }
}
