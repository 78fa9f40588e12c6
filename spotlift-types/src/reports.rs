//! Report envelopes produced by the orchestrator.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{AttributionResult, CreativeId, SpotKey, error::SpotLiftError};

/// A spot that could not be attributed, tagged with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotFailure {
    /// Spot the failure refers to.
    pub key: SpotKey,
    /// Why attribution failed.
    pub error: SpotLiftError,
}

/// Summary of an attribution run.
///
/// Carries one result per attributable spot keyed by `(timestamp, creative_id)`,
/// tagged failures for spots that could not be attributed, and non-fatal
/// warnings such as empty baseline windows.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AttributionReport {
    /// Results keyed by spot, in timestamp then creative order.
    ///
    /// Serialized as a sequence since the key is not a string.
    #[serde(with = "results_as_seq")]
    pub results: BTreeMap<SpotKey, AttributionResult>,
    /// Spots skipped because of a per-spot error.
    pub failures: Vec<SpotFailure>,
    /// Non-fatal issues encountered while attributing.
    pub warnings: Vec<SpotLiftError>,
}

impl AttributionReport {
    /// Look up a result by airing time and creative.
    #[must_use]
    pub fn get(&self, key: &SpotKey) -> Option<&AttributionResult> {
        self.results.get(key)
    }

    /// Number of spots that produced a result.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// True when no spot produced a result.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Per-creative rollup for ROI reporting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreativeSummary {
    /// Creative being summarized.
    pub creative_id: CreativeId,
    /// Number of airings in the spot log.
    pub spots: usize,
    /// Total spend, rounded to cents.
    pub spend: Decimal,
    /// Sum of defined lifts across this creative's attributed spots.
    pub total_lift: f64,
    /// Airings whose lift was undefined or that failed attribution.
    pub unattributed: usize,
    /// `spend / total_lift` when total lift is positive.
    pub cost_per_visit: Option<Decimal>,
}

mod results_as_seq {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer, Serializer};

    use crate::{AttributionResult, SpotKey};

    pub fn serialize<S>(
        map: &BTreeMap<SpotKey, AttributionResult>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(map.values())
    }

    pub fn deserialize<'de, D>(
        deserializer: D,
    ) -> Result<BTreeMap<SpotKey, AttributionResult>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let items = Vec::<AttributionResult>::deserialize(deserializer)?;
        Ok(items.into_iter().map(|r| (r.key(), r)).collect())
    }
}
