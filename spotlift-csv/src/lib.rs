//! spotlift-csv
//!
//! Reads the two input logs consumed by `spotlift`:
//!
//! - traffic: `time`, `value`, `traffic_source`
//! - spots: `time`, `creative_id`, `spend`, and optionally `program`,
//!   `network_code`, `rotation`
//!
//! Other columns are ignored. Timestamps carrying an offset are converted to
//! UTC; naive timestamps are read in the source's configured time zone.
#![warn(missing_docs)]

/// Timestamp and number parsing.
pub mod parse;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono_tz::Tz;
use serde::Deserialize;
use spotlift_core::{CreativeId, SpotEvent, SpotLiftError, TrafficSample};

pub use parse::{parse_decimal, parse_timestamp, parse_value};

#[derive(Debug, Deserialize)]
struct TrafficRow {
    time: Option<String>,
    value: Option<String>,
    traffic_source: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SpotRow {
    time: Option<String>,
    creative_id: Option<String>,
    spend: Option<String>,
    #[serde(default)]
    program: Option<String>,
    #[serde(default)]
    network_code: Option<String>,
    #[serde(default)]
    rotation: Option<String>,
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

fn csv_err(label: &str, e: &csv::Error) -> SpotLiftError {
    let what = e.position().map_or_else(
        || label.to_string(),
        |p| format!("{label} line {}", p.line()),
    );
    match e.kind() {
        csv::ErrorKind::Io(io) => SpotLiftError::Io(format!("{what}: {io}")),
        _ => SpotLiftError::parse(what, e.to_string()),
    }
}

/// CSV reader for traffic and spot logs.
#[derive(Debug, Clone, Copy)]
pub struct CsvSource {
    tz: Tz,
}

impl Default for CsvSource {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvSource {
    /// Reader that treats naive timestamps as UTC.
    #[must_use]
    pub const fn new() -> Self {
        Self { tz: Tz::UTC }
    }

    /// Reader that treats naive timestamps as local time in `tz`.
    #[must_use]
    pub const fn with_timezone(tz: Tz) -> Self {
        Self { tz }
    }

    /// Zone applied to naive timestamps.
    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.tz
    }

    fn reader<R: Read>(rdr: R) -> csv::Reader<R> {
        csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(rdr)
    }

    /// Parse traffic rows.
    ///
    /// # Errors
    /// - `SpotLiftError::MissingTimestamp` if a row has an empty `time`.
    /// - `SpotLiftError::Parse` for malformed timestamps, values or CSV framing.
    pub fn read_traffic<R: Read>(&self, rdr: R) -> Result<Vec<TrafficSample>, SpotLiftError> {
        let mut out = Vec::new();
        for (i, row) in Self::reader(rdr).deserialize::<TrafficRow>().enumerate() {
            let row = row.map_err(|e| csv_err("traffic", &e))?;
            // Header is line 1.
            let at = format!("traffic line {}", i + 2);
            let time = non_empty(row.time)
                .ok_or_else(|| SpotLiftError::missing_timestamp(at.clone()))?;
            let ts = parse_timestamp(&time, self.tz)
                .map_err(|msg| SpotLiftError::parse(format!("{at}, column time"), msg))?;
            let raw_value = non_empty(row.value).ok_or_else(|| {
                SpotLiftError::parse(format!("{at}, column value"), "missing value")
            })?;
            let value = parse_value(&raw_value)
                .map_err(|msg| SpotLiftError::parse(format!("{at}, column value"), msg))?;
            let source = non_empty(row.traffic_source).unwrap_or_default();
            out.push(TrafficSample { ts, value, source });
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "spotlift::csv", rows = out.len(), "traffic loaded");
        Ok(out)
    }

    /// Parse spot rows.
    ///
    /// # Errors
    /// - `SpotLiftError::MissingTimestamp` if a row has an empty `time`.
    /// - `SpotLiftError::Parse` for malformed timestamps, spend, a missing
    ///   creative id, or CSV framing.
    pub fn read_spots<R: Read>(&self, rdr: R) -> Result<Vec<SpotEvent>, SpotLiftError> {
        let mut out = Vec::new();
        for (i, row) in Self::reader(rdr).deserialize::<SpotRow>().enumerate() {
            let row = row.map_err(|e| csv_err("spots", &e))?;
            let at = format!("spots line {}", i + 2);
            let time = non_empty(row.time)
                .ok_or_else(|| SpotLiftError::missing_timestamp(at.clone()))?;
            let ts = parse_timestamp(&time, self.tz)
                .map_err(|msg| SpotLiftError::parse(format!("{at}, column time"), msg))?;
            let creative_id = non_empty(row.creative_id).ok_or_else(|| {
                SpotLiftError::parse(format!("{at}, column creative_id"), "missing creative id")
            })?;
            let raw_spend = non_empty(row.spend).ok_or_else(|| {
                SpotLiftError::parse(format!("{at}, column spend"), "missing spend")
            })?;
            let spend = parse_decimal(&raw_spend)
                .map_err(|msg| SpotLiftError::parse(format!("{at}, column spend"), msg))?;
            out.push(SpotEvent {
                ts,
                creative_id: CreativeId::new(creative_id),
                spend,
                program: non_empty(row.program),
                network_code: non_empty(row.network_code),
                rotation: non_empty(row.rotation),
            });
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "spotlift::csv", rows = out.len(), "spots loaded");
        Ok(out)
    }

    /// Open and parse a traffic file.
    ///
    /// # Errors
    /// Returns `SpotLiftError::Io` if the file cannot be opened, otherwise as
    /// [`read_traffic`](Self::read_traffic).
    pub fn load_traffic(&self, path: impl AsRef<Path>) -> Result<Vec<TrafficSample>, SpotLiftError> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| SpotLiftError::Io(format!("{}: {e}", path.display())))?;
        self.read_traffic(file)
    }

    /// Open and parse a spot file.
    ///
    /// # Errors
    /// Returns `SpotLiftError::Io` if the file cannot be opened, otherwise as
    /// [`read_spots`](Self::read_spots).
    pub fn load_spots(&self, path: impl AsRef<Path>) -> Result<Vec<SpotEvent>, SpotLiftError> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| SpotLiftError::Io(format!("{}: {e}", path.display())))?;
        self.read_spots(file)
    }
}
