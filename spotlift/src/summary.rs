use std::collections::BTreeMap;

use rust_decimal::Decimal;
use spotlift_core::{
    AttributionReport, CreativeId, CreativeSummary, TimeSeriesStore, round_cents,
    spend_by_creative,
};

use crate::SpotLift;

impl SpotLift {
    /// Total spend per creative, rounded to cents.
    #[must_use]
    pub fn spend_by_creative(&self, store: &TimeSeriesStore) -> BTreeMap<CreativeId, Decimal> {
        spend_by_creative(store.spots())
    }

    /// Per-creative spend and lift rollup for ROI reporting.
    ///
    /// Every creative in the spot log appears once, in id order. Spots without
    /// a defined lift (empty baseline, failures, duplicates) count toward spend
    /// and `unattributed` but not toward `total_lift`.
    #[must_use]
    pub fn creative_summaries(
        &self,
        store: &TimeSeriesStore,
        report: &AttributionReport,
    ) -> Vec<CreativeSummary> {
        let mut airings: BTreeMap<&CreativeId, usize> = BTreeMap::new();
        for s in store.spots() {
            *airings.entry(&s.creative_id).or_default() += 1;
        }
        let mut lifts: BTreeMap<&CreativeId, (f64, usize)> = BTreeMap::new();
        for r in report.results.values() {
            if let Some(lift) = r.lift {
                let e = lifts.entry(&r.creative_id).or_default();
                e.0 += lift;
                e.1 += 1;
            }
        }

        spend_by_creative(store.spots())
            .into_iter()
            .map(|(creative_id, spend)| {
                let spots = airings.get(&creative_id).copied().unwrap_or(0);
                let (total_lift, attributed) = lifts.get(&creative_id).copied().unwrap_or_default();
                let cost_per_visit = if total_lift > 0.0 {
                    Decimal::from_f64_retain(total_lift)
                        .and_then(|l| spend.checked_div(l))
                        .map(round_cents)
                } else {
                    None
                };
                CreativeSummary {
                    creative_id,
                    spots,
                    spend,
                    total_lift,
                    unattributed: spots.saturating_sub(attributed),
                    cost_per_visit,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use spotlift_core::{SpotEvent, TrafficSample};

    fn t(min: i64) -> chrono::DateTime<chrono::Utc> {
        DateTime::from_timestamp(min * 60 + 30, 0).unwrap()
    }

    #[test]
    fn creative_without_lift_has_no_cost_per_visit() {
        let engine = SpotLift::builder().build().unwrap();
        let store = engine
            .store(
                vec![],
                vec![SpotEvent::new(t(100), "quiet", Decimal::new(12_345, 2))],
            )
            .unwrap();
        let report = engine.attribute_all(&store);
        let sums = engine.creative_summaries(&store, &report);
        assert_eq!(sums.len(), 1);
        assert_eq!(sums[0].spend, Decimal::new(12_345, 2));
        assert_eq!(sums[0].unattributed, 1);
        assert_eq!(sums[0].cost_per_visit, None);
    }

    #[test]
    fn cost_per_visit_divides_spend_by_lift() {
        let engine = SpotLift::builder().build().unwrap();
        // Baseline of 10/minute, 60 extra visits right after the airing.
        let mut traffic: Vec<TrafficSample> = (90..=106)
            .map(|m| TrafficSample::direct(DateTime::from_timestamp(m * 60, 0).unwrap(), 10.0))
            .collect();
        traffic.push(TrafficSample::direct(t(101), 60.0));
        let store = engine
            .store(traffic, vec![SpotEvent::new(t(100), "loud", Decimal::new(300, 0))])
            .unwrap();
        let report = engine.attribute_all(&store);
        let sums = engine.creative_summaries(&store, &report);
        // Lift window [100:30, 105:30] holds minutes 101..=105 plus the spike.
        assert_eq!(sums[0].total_lift, 50.0 + 60.0 - 10.0);
        assert_eq!(sums[0].cost_per_visit, Some(Decimal::new(300, 2)));
    }
}
