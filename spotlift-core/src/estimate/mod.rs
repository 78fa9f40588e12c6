//! Per-spot estimators.
//!
//! - `policy`: validated window lengths and search bounds
//! - `baseline`: conflict-free pre-airing window and its mean traffic
//! - `lift`: post-airing traffic net of overlap credit
/// Conflict-free baseline search and mean.
pub mod baseline;
/// Overlap-weighted lift.
pub mod lift;
/// Window lengths converted for timestamp arithmetic.
pub mod policy;
