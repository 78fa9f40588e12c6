//! spotlift-core
//!
//! Core types and estimators shared across the spotlift crates.
//!
//! - `types`: data model re-exported from `spotlift-types` (samples, spots, results).
//! - `timeseries`: the read-only store and inclusive interval queries over it.
//! - `estimate`: the baseline and lift estimators for a single spot.
//! - `spend`: per-creative spend aggregation.
//!
//! Every function here is synchronous and pure over immutable slices; the
//! orchestrator in the `spotlift` crate decides how spots are scheduled.
#![warn(missing_docs)]

/// Baseline and lift estimators.
pub mod estimate;
/// Per-creative spend rollups.
pub mod spend;
/// Time-series store and interval queries.
pub mod timeseries;
pub mod types;

pub use estimate::baseline::{BaselineEstimate, calc_baseline, resolve_baseline_window};
pub use estimate::lift::{calc_lift, lift_breakdown, overlapping_spots};
pub use estimate::policy::WindowPolicy;
pub use spend::{round_cents, spend_by_creative};
pub use timeseries::query::{spots_in_interval, traffic_in_interval, traffic_sum};
pub use timeseries::store::TimeSeriesStore;
pub use timeseries::util::floor_to_minute;
pub use types::*;
