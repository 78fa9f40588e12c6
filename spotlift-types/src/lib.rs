//! Spotlift-specific data transfer objects and configuration primitives.
#![warn(missing_docs)]

mod attribution;
mod config;
mod error;
mod model;
mod reports;

pub use attribution::{AttributionResult, LiftBreakdown, OverlapSegment};
pub use config::{AttributionConfig, MAX_SPAN};
pub use error::SpotLiftError;
pub use model::{CreativeId, SpotEvent, SpotKey, TimeWindow, TrafficSample};
pub use reports::{AttributionReport, CreativeSummary, SpotFailure};
