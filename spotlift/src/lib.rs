//! Spotlift attributes website traffic to individual TV spot airings.
//!
//! Overview
//! - Builds a read-only store from direct traffic samples and the spot log.
//! - For every spot, finds a conflict-free baseline window before the airing
//!   and measures lift in a fixed window after it.
//! - Splits traffic in windows shared by several spots in equal shares, so a
//!   visit is never credited twice.
//! - Reports per-spot failures (unresolved baselines, duplicate spots) next to
//!   the results instead of aborting the run.
//!
//! Key behaviors and trade-offs
//! - Baseline search steps back one minute at a time and gives up after the
//!   configured lookback; dense schedules surface `BaselineUnresolved`.
//! - An empty baseline window yields `None` for both baseline and lift rather
//!   than a fabricated zero.
//! - Overlap credit assumes competing spots earn equal shares; the concurrency
//!   count is measured at the latest overlap and held for the whole chain.
//! - `attribute_all_concurrent` spreads spots over blocking tasks; output is
//!   identical to `attribute_all`.
//!
//! Examples
//! ```rust,ignore
//! use spotlift::{SpotLift, TrafficSample, SpotEvent};
//!
//! let engine = SpotLift::builder()
//!     .baseline_window(std::time::Duration::from_secs(300))
//!     .max_lookback(std::time::Duration::from_secs(3600))
//!     .build()?;
//! let store = engine.store(traffic, spots)?;
//! let report = engine.attribute_all(&store);
//! for (key, r) in &report.results {
//!     println!("{key}: baseline={:?} lift={:?}", r.baseline, r.lift);
//! }
//! let summaries = engine.creative_summaries(&store, &report);
//! ```
#![warn(missing_docs)]

mod attribute;
pub(crate) mod core;
mod summary;

pub use core::{SpotLift, SpotLiftBuilder};

// Re-export core types for convenience
pub use spotlift_core::{
    AttributionConfig, AttributionReport, AttributionResult, CreativeId, CreativeSummary,
    LiftBreakdown, OverlapSegment, SpotEvent, SpotFailure, SpotKey, SpotLiftError,
    TimeSeriesStore, TimeWindow, TrafficSample, WindowPolicy,
};
