//! Configuration shared by the estimators and the orchestrator.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::SpotLiftError;

/// Longest accepted window, step or lookback.
pub const MAX_SPAN: Duration = Duration::from_secs(366 * 24 * 60 * 60);

/// Attribution policy knobs.
///
/// Window lengths and search bounds live here rather than as constants in the
/// estimators, so a run can be reproduced from its config alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributionConfig {
    /// Width of the pre-airing baseline window.
    pub baseline_window: Duration,
    /// Width of the post-airing lift window; also the span a spot occupies
    /// when checked against other spots' lift windows.
    pub lift_window: Duration,
    /// Step by which the baseline window moves back on each conflict.
    pub shift_step: Duration,
    /// Maximum total backward shift before the baseline is reported unresolved.
    pub max_lookback: Duration,
    /// Offset after the airing before other spots count as overlaps.
    pub overlap_offset: Duration,
    /// Traffic source retained for attribution.
    pub traffic_source: String,
}

impl Default for AttributionConfig {
    fn default() -> Self {
        Self {
            baseline_window: Duration::from_secs(5 * 60),
            lift_window: Duration::from_secs(5 * 60),
            shift_step: Duration::from_secs(60),
            max_lookback: Duration::from_secs(60 * 60),
            overlap_offset: Duration::from_secs(1),
            traffic_source: "direct".to_string(),
        }
    }
}

impl AttributionConfig {
    /// Check internal consistency.
    ///
    /// # Errors
    /// Returns `SpotLiftError::InvalidArg` if a window or the shift step is zero,
    /// if any duration exceeds [`MAX_SPAN`], or if the overlap offset is not
    /// shorter than the lift window.
    pub fn validate(&self) -> Result<(), SpotLiftError> {
        for (name, d) in [
            ("baseline_window", self.baseline_window),
            ("lift_window", self.lift_window),
            ("shift_step", self.shift_step),
            ("max_lookback", self.max_lookback),
            ("overlap_offset", self.overlap_offset),
        ] {
            if d > MAX_SPAN {
                return Err(SpotLiftError::InvalidArg(format!(
                    "{name} ({d:?}) exceeds the {} day limit",
                    MAX_SPAN.as_secs() / 86_400
                )));
            }
        }
        if self.baseline_window.is_zero() {
            return Err(SpotLiftError::InvalidArg(
                "baseline_window must be non-zero".into(),
            ));
        }
        if self.lift_window.is_zero() {
            return Err(SpotLiftError::InvalidArg(
                "lift_window must be non-zero".into(),
            ));
        }
        if self.shift_step.is_zero() {
            return Err(SpotLiftError::InvalidArg(
                "shift_step must be non-zero".into(),
            ));
        }
        if self.overlap_offset >= self.lift_window {
            return Err(SpotLiftError::InvalidArg(format!(
                "overlap_offset ({:?}) must be shorter than lift_window ({:?})",
                self.overlap_offset, self.lift_window
            )));
        }
        if self.traffic_source.trim().is_empty() {
            return Err(SpotLiftError::InvalidArg(
                "traffic_source must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Number of backward shifts allowed by `max_lookback`.
    #[must_use]
    pub fn max_shifts(&self) -> u64 {
        let step = self.shift_step.as_nanos().max(1);
        u64::try_from(self.max_lookback.as_nanos() / step).unwrap_or(u64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid_and_allows_sixty_shifts() {
        let cfg = AttributionConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.max_shifts(), 60);
    }

    #[test]
    fn zero_lift_window_rejected() {
        let cfg = AttributionConfig {
            lift_window: Duration::ZERO,
            ..AttributionConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(SpotLiftError::InvalidArg(_))));
    }

    #[test]
    fn spans_beyond_a_year_rejected() {
        let cfg = AttributionConfig {
            max_lookback: MAX_SPAN + Duration::from_secs(1),
            ..AttributionConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(SpotLiftError::InvalidArg(_))));
        let cfg = AttributionConfig {
            baseline_window: MAX_SPAN,
            ..AttributionConfig::default()
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn offset_longer_than_lift_window_rejected() {
        let cfg = AttributionConfig {
            lift_window: Duration::from_secs(1),
            overlap_offset: Duration::from_secs(1),
            ..AttributionConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn serde_roundtrip_keeps_windows() {
        let cfg = AttributionConfig {
            baseline_window: Duration::from_secs(600),
            ..AttributionConfig::default()
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let back: AttributionConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
