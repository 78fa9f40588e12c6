mod helpers;

use std::sync::Arc;
use std::time::Duration;

use helpers::{at, minutely, spot, visits};
use spotlift::{SpotKey, SpotLift, SpotLiftError, TrafficSample};

fn key(ts: chrono::DateTime<chrono::Utc>, creative: &str) -> SpotKey {
    spot(ts, creative).key()
}

#[test]
fn lone_spot_lift_is_window_sum_minus_baseline() {
    let engine = SpotLift::builder().build().unwrap();
    let traffic = vec![
        visits(10, 0, 100.0),
        visits(10, 1, 120.0),
        visits(10, 2, 110.0),
        visits(10, 6, 150.0),
        visits(10, 8, 150.0),
    ];
    let store = engine
        .store(traffic, vec![spot(at(10, 5, 0), "X")])
        .unwrap();
    let report = engine.attribute_all(&store);

    let r = report.get(&key(at(10, 5, 0), "X")).unwrap();
    assert_eq!(r.baseline, Some(110.0));
    assert_eq!(r.breakdown.raw_sum, 300.0);
    assert_eq!(r.lift, Some(190.0));
    assert!(report.failures.is_empty());
    assert!(report.warnings.is_empty());
}

#[test]
fn overlapping_pair_splits_shared_minutes_in_half() {
    let engine = SpotLift::builder().build().unwrap();
    // 09:00..=10:20, value = minute index so every minute is distinct.
    let traffic = minutely(0, 80, f64::from);
    let store = engine
        .store(
            traffic,
            vec![spot(at(10, 0, 0), "A"), spot(at(10, 2, 0), "B")],
        )
        .unwrap();
    let report = engine.attribute_all(&store);

    let a = report.get(&key(at(10, 0, 0), "A")).unwrap();
    // 10:02..=10:05 are minutes 62..=65.
    let shared = 62.0 + 63.0 + 64.0 + 65.0;
    assert_eq!(a.breakdown.segments.len(), 1);
    assert_eq!(a.breakdown.segments[0].concurrency, 1);
    assert_eq!(a.breakdown.subtracted_overlap, shared / 2.0);

    // B airs last, so nothing later competes for its window.
    let b = report.get(&key(at(10, 2, 0), "B")).unwrap();
    assert!(b.breakdown.is_isolated());
}

#[test]
fn lift_identity_holds_for_every_result() {
    let engine = SpotLift::builder().build().unwrap();
    let traffic = minutely(0, 180, |m| f64::from(m % 7) * 3.0 + 5.0);
    let spots = vec![
        spot(at(9, 40, 10), "A"),
        spot(at(9, 42, 0), "B"),
        spot(at(9, 43, 30), "C"),
        spot(at(10, 30, 0), "A"),
        spot(at(11, 0, 45), "D"),
    ];
    let store = engine.store(traffic, spots).unwrap();
    let report = engine.attribute_all(&store);
    assert_eq!(report.len(), 5);
    for r in report.results.values() {
        let b = r.baseline.unwrap();
        assert_eq!(
            r.lift,
            Some(r.breakdown.raw_sum - r.breakdown.subtracted_overlap - b)
        );
        assert_eq!(r.baseline_window.len(), chrono::TimeDelta::minutes(5));
        assert_eq!(r.breakdown.window.start, r.ts);
    }
}

#[test]
fn empty_baseline_window_leaves_lift_undefined() {
    let engine = SpotLift::builder().build().unwrap();
    let traffic = vec![visits(10, 1, 40.0), visits(10, 3, 40.0)];
    let store = engine
        .store(traffic, vec![spot(at(10, 0, 30), "A")])
        .unwrap();
    let report = engine.attribute_all(&store);

    let r = report.get(&key(at(10, 0, 30), "A")).unwrap();
    assert_eq!(r.baseline, None);
    assert_eq!(r.lift, None);
    assert_eq!(r.breakdown.raw_sum, 80.0);
    assert!(matches!(
        report.warnings.as_slice(),
        [SpotLiftError::EmptyWindow { .. }]
    ));
}

#[test]
fn unresolved_baseline_does_not_stop_other_spots() {
    let engine = SpotLift::builder()
        .max_lookback(Duration::from_secs(10 * 60))
        .build()
        .unwrap();
    // A spot every minute from 09:00 to 10:00, then a lone spot at noon.
    let mut spots: Vec<_> = (0..=60).map(|m| spot(at(9 + m / 60, m % 60, 0), "dense")).collect();
    spots.push(spot(at(12, 0, 30), "lone"));
    let traffic = minutely(0, 200, |_| 10.0);
    let store = engine.store(traffic, spots).unwrap();
    let report = engine.attribute_all(&store);

    assert!(report.get(&key(at(12, 0, 30), "lone")).is_some());
    let unresolved = report
        .failures
        .iter()
        .filter(|f| matches!(f.error, SpotLiftError::BaselineUnresolved { .. }))
        .count();
    assert!(unresolved > 0);
    assert!(
        report
            .failures
            .iter()
            .any(|f| f.key == key(at(10, 0, 0), "dense"))
    );
    assert_eq!(report.len() + report.failures.len(), 62);
}

#[test]
fn duplicate_airing_fails_only_that_key() {
    let engine = SpotLift::builder().build().unwrap();
    let traffic = minutely(0, 120, |_| 3.0);
    let spots = vec![
        spot(at(9, 30, 0), "A"),
        spot(at(9, 30, 0), "A"),
        spot(at(10, 30, 0), "B"),
    ];
    let store = engine.store(traffic, spots).unwrap();
    let report = engine.attribute_all(&store);

    assert!(report.get(&key(at(9, 30, 0), "A")).is_none());
    assert!(report.get(&key(at(10, 30, 0), "B")).is_some());
    assert_eq!(report.failures.len(), 1);
    assert!(matches!(
        report.failures[0].error,
        SpotLiftError::DuplicateSpot { count: 2, .. }
    ));
}

#[test]
fn non_direct_traffic_is_ignored() {
    let engine = SpotLift::builder().build().unwrap();
    let mut traffic = minutely(0, 120, |_| 1.0);
    traffic.push(TrafficSample::new(at(10, 1, 0), 1000.0, "search"));
    let store = engine
        .store(traffic, vec![spot(at(10, 0, 30), "A")])
        .unwrap();
    let report = engine.attribute_all(&store);
    let r = report.get(&key(at(10, 0, 30), "A")).unwrap();
    assert_eq!(r.breakdown.raw_sum, 5.0);
    assert_eq!(r.lift, Some(4.0));
}

#[test]
fn repeated_runs_are_identical() {
    let engine = SpotLift::builder().build().unwrap();
    let traffic = minutely(0, 240, |m| f64::from(m * 37 % 11) + 0.1);
    let spots: Vec<_> = [(9, 20, 5), (9, 22, 40), (9, 24, 0), (10, 10, 0), (12, 0, 0)]
        .iter()
        .zip(["A", "B", "A", "C", "B"])
        .map(|(&(h, m, s), c)| spot(at(h, m, s), c))
        .collect();
    let store = engine.store(traffic, spots).unwrap();
    assert_eq!(engine.attribute_all(&store), engine.attribute_all(&store));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_run_matches_sequential() {
    let engine = SpotLift::builder().build().unwrap();
    let traffic = minutely(0, 600, |m| f64::from((m * 13) % 29));
    let mut spots: Vec<_> = (0..40u32)
        .map(|i| {
            let m = i * 13 % 590;
            spot(at(9 + m / 60, m % 60, (i * 7) % 60), ["A", "B", "C"][i as usize % 3])
        })
        .collect();
    spots.push(spots[3].clone());
    let store = Arc::new(engine.store(traffic, spots).unwrap());

    let sequential = engine.attribute_all(&store);
    let concurrent = engine
        .attribute_all_concurrent(Arc::clone(&store))
        .await
        .unwrap();
    assert_eq!(sequential, concurrent);
    assert!(!sequential.failures.is_empty());
}

#[test]
fn concurrent_run_on_empty_store() {
    let engine = SpotLift::builder().build().unwrap();
    let store = Arc::new(engine.store(vec![], vec![]).unwrap());
    let report = tokio_test::block_on(engine.attribute_all_concurrent(store)).unwrap();
    assert!(report.is_empty());
    assert!(report.failures.is_empty());
}

#[test]
fn overlaps_for_lists_later_spots_in_window() {
    let engine = SpotLift::builder().build().unwrap();
    let spots = vec![
        spot(at(10, 0, 0), "A"),
        spot(at(10, 3, 0), "B"),
        spot(at(10, 5, 0), "C"),
        spot(at(10, 5, 1), "D"),
    ];
    let store = engine.store(vec![], spots).unwrap();
    let overlaps = engine.overlaps_for(&store.spots()[0], &store);
    let ids: Vec<&str> = overlaps.iter().map(|s| s.creative_id.as_str()).collect();
    assert_eq!(ids, vec!["B", "C"]);
}
