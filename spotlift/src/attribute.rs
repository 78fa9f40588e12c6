use std::collections::BTreeMap;
use std::sync::Arc;

use spotlift_core::{
    AttributionReport, AttributionResult, SpotEvent, SpotFailure, SpotKey, SpotLiftError,
    TimeSeriesStore, calc_baseline, lift_breakdown,
};

use crate::SpotLift;

type Outcome = (usize, SpotKey, Result<AttributionResult, SpotLiftError>);

/// Spots to attribute, by index into the store, plus failures for keys that
/// occur more than once.
fn plan(spots: &[SpotEvent]) -> (Vec<usize>, Vec<SpotFailure>) {
    let mut counts: BTreeMap<SpotKey, usize> = BTreeMap::new();
    for s in spots {
        *counts.entry(s.key()).or_default() += 1;
    }
    let mut unique = Vec::with_capacity(spots.len());
    let mut failures = Vec::new();
    for (i, s) in spots.iter().enumerate() {
        let key = s.key();
        match counts.get_mut(&key) {
            Some(1) => unique.push(i),
            // Report a colliding key once, then mark it consumed.
            Some(n) if *n > 1 => {
                let error = SpotLiftError::duplicate(key.to_string(), *n);
                *n = 0;
                failures.push(SpotFailure { key, error });
            }
            _ => {}
        }
    }
    (unique, failures)
}

fn assemble(mut outcomes: Vec<Outcome>, failures: Vec<SpotFailure>) -> AttributionReport {
    outcomes.sort_by_key(|(i, _, _)| *i);
    let mut report = AttributionReport {
        failures,
        ..AttributionReport::default()
    };
    for (_, key, outcome) in outcomes {
        match outcome {
            Ok(result) => {
                if result.baseline.is_none() {
                    report
                        .warnings
                        .push(SpotLiftError::empty_window(key.to_string(), "baseline"));
                }
                report.results.insert(key, result);
            }
            Err(error) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(target: "spotlift::attribute", spot = %key, %error, "spot skipped");
                report.failures.push(SpotFailure { key, error });
            }
        }
    }
    report
}

impl SpotLift {
    /// Baseline and lift for a single spot.
    ///
    /// Reads only the store's raw series, never another spot's result.
    ///
    /// # Errors
    /// Returns `SpotLiftError::BaselineUnresolved` if no clear baseline window
    /// exists within the configured lookback.
    pub fn attribute_spot(
        &self,
        spot: &SpotEvent,
        store: &TimeSeriesStore,
    ) -> Result<AttributionResult, SpotLiftError> {
        let baseline = calc_baseline(spot, store.traffic(), store.spots(), &self.policy)?;
        let breakdown = lift_breakdown(spot, store.traffic(), store.spots(), &self.policy);
        Ok(AttributionResult {
            creative_id: spot.creative_id.clone(),
            ts: spot.ts,
            baseline_window: baseline.window,
            baseline: baseline.mean,
            lift: breakdown.lift(baseline.mean),
            breakdown,
        })
    }

    /// Attribute every spot in the store.
    ///
    /// Per-spot failures are collected in the report and never abort the run.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "spotlift::attribute_all",
            skip_all,
            fields(spots = store.spots().len(), samples = store.traffic().len()),
        )
    )]
    #[must_use]
    pub fn attribute_all(&self, store: &TimeSeriesStore) -> AttributionReport {
        let (unique, failures) = plan(store.spots());
        let outcomes = unique
            .into_iter()
            .map(|i| {
                let spot = &store.spots()[i];
                (i, spot.key(), self.attribute_spot(spot, store))
            })
            .collect();
        assemble(outcomes, failures)
    }

    /// Attribute every spot, spreading the work over blocking tasks.
    ///
    /// Spots are split into one chunk per available core and each chunk runs
    /// on Tokio's blocking pool. The report is identical to [`attribute_all`].
    ///
    /// # Errors
    /// Returns `SpotLiftError::Other` if a worker task panics or is cancelled.
    ///
    /// [`attribute_all`]: SpotLift::attribute_all
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "spotlift::attribute_all_concurrent",
            skip_all,
            fields(spots = store.spots().len()),
        )
    )]
    pub async fn attribute_all_concurrent(
        &self,
        store: Arc<TimeSeriesStore>,
    ) -> Result<AttributionReport, SpotLiftError> {
        let (unique, failures) = plan(store.spots());
        let workers = std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get);
        let chunk = unique.len().div_ceil(workers).max(1);

        let tasks = unique.chunks(chunk).map(|ids| {
            let ids = ids.to_vec();
            let store = Arc::clone(&store);
            let engine = self.clone();
            tokio::task::spawn_blocking(move || {
                ids.into_iter()
                    .map(|i| {
                        let spot = &store.spots()[i];
                        (i, spot.key(), engine.attribute_spot(spot, &store))
                    })
                    .collect::<Vec<Outcome>>()
            })
        });

        let mut outcomes = Vec::with_capacity(unique.len());
        for joined in futures::future::join_all(tasks).await {
            let part = joined.map_err(|e| SpotLiftError::Other(format!("worker failed: {e}")))?;
            outcomes.extend(part);
        }
        Ok(assemble(outcomes, failures))
    }
}
