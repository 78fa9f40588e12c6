use crate::{SpotEvent, SpotLiftError, TrafficSample};

/// Read-only traffic and spot series, each sorted by timestamp.
///
/// Sorting is stable, so samples sharing a timestamp keep their input order;
/// all of them take part in aggregations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeriesStore {
    traffic: Vec<TrafficSample>,
    spots: Vec<SpotEvent>,
}

impl TimeSeriesStore {
    /// Build a store from unsorted inputs.
    ///
    /// # Errors
    /// Returns `SpotLiftError::Parse` if any traffic value is NaN or infinite.
    pub fn new(
        mut traffic: Vec<TrafficSample>,
        mut spots: Vec<SpotEvent>,
    ) -> Result<Self, SpotLiftError> {
        if let Some(bad) = traffic.iter().find(|s| !s.value.is_finite()) {
            return Err(SpotLiftError::parse(
                format!("traffic sample at {}", bad.ts.to_rfc3339()),
                format!("non-finite value {}", bad.value),
            ));
        }
        traffic.sort_by_key(|s| s.ts);
        spots.sort_by_key(|s| s.ts);
        Ok(Self { traffic, spots })
    }

    /// Keep only traffic samples whose source equals `source`.
    #[must_use]
    pub fn retain_source(mut self, source: &str) -> Self {
        self.traffic.retain(|s| s.source == source);
        self
    }

    /// Traffic samples in ascending timestamp order.
    #[must_use]
    pub fn traffic(&self) -> &[TrafficSample] {
        &self.traffic
    }

    /// Spot events in ascending timestamp order.
    #[must_use]
    pub fn spots(&self) -> &[SpotEvent] {
        &self.spots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use rust_decimal::Decimal;

    fn t(sec: i64) -> chrono::DateTime<chrono::Utc> {
        DateTime::from_timestamp(sec, 0).unwrap()
    }

    #[test]
    fn sorts_both_series() {
        let store = TimeSeriesStore::new(
            vec![TrafficSample::direct(t(120), 2.0), TrafficSample::direct(t(60), 1.0)],
            vec![
                SpotEvent::new(t(300), "b", Decimal::ONE),
                SpotEvent::new(t(0), "a", Decimal::ONE),
            ],
        )
        .unwrap();
        assert_eq!(store.traffic()[0].ts, t(60));
        assert_eq!(store.spots()[0].creative_id.as_str(), "a");
    }

    #[test]
    fn rejects_nan_traffic() {
        let err = TimeSeriesStore::new(vec![TrafficSample::direct(t(0), f64::NAN)], vec![])
            .unwrap_err();
        assert!(matches!(err, SpotLiftError::Parse { .. }));
    }

    #[test]
    fn retain_source_drops_other_channels() {
        let store = TimeSeriesStore::new(
            vec![
                TrafficSample::direct(t(0), 1.0),
                TrafficSample::new(t(0), 5.0, "search"),
            ],
            vec![],
        )
        .unwrap()
        .retain_source("direct");
        assert_eq!(store.traffic().len(), 1);
        assert!((store.traffic()[0].value - 1.0).abs() < f64::EPSILON);
    }
}
