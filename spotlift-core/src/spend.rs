use std::collections::BTreeMap;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::{CreativeId, SpotEvent};

/// Round a monetary amount to cents, halves away from zero.
#[must_use]
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Total spend per creative, rounded to two decimal places.
///
/// Amounts are summed exactly and rounded once per creative.
#[must_use]
pub fn spend_by_creative(spots: &[SpotEvent]) -> BTreeMap<CreativeId, Decimal> {
    let mut totals: BTreeMap<CreativeId, Decimal> = BTreeMap::new();
    for s in spots {
        *totals.entry(s.creative_id.clone()).or_default() += s.spend;
    }
    for v in totals.values_mut() {
        *v = round_cents(*v);
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn s(id: &str, mills: i64) -> SpotEvent {
        SpotEvent::new(
            DateTime::from_timestamp(0, 0).unwrap(),
            id,
            Decimal::new(mills, 3),
        )
    }

    #[test]
    fn sums_then_rounds_once() {
        // 0.333 + 0.333 + 0.334 = 1.000
        let spots = vec![s("a", 333), s("a", 333), s("a", 334), s("b", 1005)];
        let totals = spend_by_creative(&spots);
        assert_eq!(totals[&CreativeId::from("a")], Decimal::new(100, 2));
        assert_eq!(totals[&CreativeId::from("b")], Decimal::new(101, 2));
    }

    #[test]
    fn empty_log_has_no_creatives() {
        assert!(spend_by_creative(&[]).is_empty());
    }
}
