// Re-export helpers so tests can `use helpers::*;`

use rust_decimal::Decimal;
use spotlift::{SpotEvent, TrafficSample};

/// Construct a UTC `DateTime` on the fixture day for readability in tests.
pub fn at(hh: u32, mm: u32, ss: u32) -> chrono::DateTime<chrono::Utc> {
    let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 14).expect("invalid date");
    let naive = date
        .and_hms_opt(hh, mm, ss)
        .expect("invalid time components");
    chrono::DateTime::<chrono::Utc>::from_naive_utc_and_offset(naive, chrono::Utc)
}

/// Direct traffic sample at `hh:mm:00`.
pub fn visits(hh: u32, mm: u32, value: f64) -> TrafficSample {
    TrafficSample::direct(at(hh, mm, 0), value)
}

/// Spot with a flat one-dollar spend.
pub fn spot(ts: chrono::DateTime<chrono::Utc>, creative: &str) -> SpotEvent {
    SpotEvent::new(ts, creative, Decimal::ONE)
}

/// One direct sample per minute over `[from, to]` (minutes after 09:00),
/// valued by `f(minute)`.
pub fn minutely(from: u32, to: u32, f: impl Fn(u32) -> f64) -> Vec<TrafficSample> {
    (from..=to)
        .map(|m| visits(9 + m / 60, m % 60, f(m)))
        .collect()
}
