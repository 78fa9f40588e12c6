//! Time-series utilities shared by the estimators and orchestrator.
//!
//! Modules include:
//! - `store`: sorted, read-only traffic and spot collections
//! - `query`: inclusive-bound interval lookups over sorted slices
//! - `util`: timestamp flooring and duration conversion
/// Inclusive interval queries.
pub mod query;
/// Read-only store holding both input series.
pub mod store;
/// Timestamp helpers.
pub mod util;
