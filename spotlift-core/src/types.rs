//! Data model shared by the estimators, re-exported from `spotlift-types`.

pub use spotlift_types::{
    AttributionConfig, AttributionReport, AttributionResult, CreativeId, CreativeSummary,
    LiftBreakdown, OverlapSegment, SpotEvent, SpotFailure, SpotKey, SpotLiftError, TimeWindow,
    TrafficSample,
};
