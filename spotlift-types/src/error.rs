use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the spotlift workspace.
///
/// This covers ingestion failures, configuration validation, and the per-spot
/// attribution conditions that the orchestrator reports without aborting a run.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SpotLiftError {
    /// A timestamp or numeric field could not be parsed.
    #[error("parse error in {what}: {msg}")]
    Parse {
        /// Location of the bad field, e.g. "spots row 12, column spend".
        what: String,
        /// Human-readable parser message.
        msg: String,
    },

    /// A sample or event arrived without a timestamp.
    #[error("missing timestamp: {what}")]
    MissingTimestamp {
        /// Location of the offending record.
        what: String,
    },

    /// Reading an input source failed.
    #[error("io error: {0}")]
    Io(String),

    /// Invalid configuration or argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// A window contained no traffic samples, so its statistic is undefined.
    #[error("empty {window} window for spot {spot}")]
    EmptyWindow {
        /// Spot key rendered as `timestamp/creative_id`.
        spot: String,
        /// Window label ("baseline" or "lift").
        window: String,
    },

    /// No conflict-free baseline window was found within the lookback bound.
    #[error("baseline unresolved for spot {spot} within {lookback_secs}s lookback")]
    BaselineUnresolved {
        /// Spot key rendered as `timestamp/creative_id`.
        spot: String,
        /// Configured maximum lookback in seconds.
        lookback_secs: u64,
    },

    /// More than one spot event shares the same timestamp and creative.
    #[error("duplicate spot {spot} ({count} events)")]
    DuplicateSpot {
        /// Spot key rendered as `timestamp/creative_id`.
        spot: String,
        /// Number of colliding events.
        count: usize,
    },

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

impl SpotLiftError {
    /// Helper: build a `Parse` error.
    pub fn parse(what: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Parse {
            what: what.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `MissingTimestamp` error.
    pub fn missing_timestamp(what: impl Into<String>) -> Self {
        Self::MissingTimestamp { what: what.into() }
    }

    /// Helper: build an `EmptyWindow` condition.
    pub fn empty_window(spot: impl Into<String>, window: impl Into<String>) -> Self {
        Self::EmptyWindow {
            spot: spot.into(),
            window: window.into(),
        }
    }

    /// Helper: build a `DuplicateSpot` error.
    pub fn duplicate(spot: impl Into<String>, count: usize) -> Self {
        Self::DuplicateSpot {
            spot: spot.into(),
            count,
        }
    }

    /// Returns true if the condition only affects a single spot.
    ///
    /// Ingestion and configuration errors are run-level; everything else is
    /// isolated to the spot it names.
    #[must_use]
    pub const fn is_per_spot(&self) -> bool {
        matches!(
            self,
            Self::EmptyWindow { .. } | Self::BaselineUnresolved { .. } | Self::DuplicateSpot { .. }
        )
    }
}

impl From<std::io::Error> for SpotLiftError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
