use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono_tz::Tz;
use clap::{Parser, ValueEnum};
use spotlift::{SpotLift, SpotLiftError};
use spotlift_csv::CsvSource;

mod render;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Table,
    Json,
}

/// Attribute direct web traffic to TV spot airings.
#[derive(Debug, Parser)]
#[command(name = "spotlift", version)]
struct Args {
    /// Traffic log: time, value, traffic_source.
    traffic: PathBuf,
    /// Spot log: time, creative_id, spend [, program, network_code, rotation].
    spots: PathBuf,
    /// Length of the pre-airing baseline window, in minutes.
    #[arg(long, default_value_t = 5)]
    baseline_minutes: u64,
    /// Length of the post-airing lift window, in minutes.
    #[arg(long, default_value_t = 5)]
    lift_minutes: u64,
    /// Give up on a spot's baseline after searching this far back, in minutes.
    #[arg(long, default_value_t = 60)]
    max_lookback_minutes: u64,
    /// Traffic source counted toward baseline and lift.
    #[arg(long, default_value = "direct")]
    source: String,
    /// Zone for timestamps that carry no UTC offset, e.g. America/New_York.
    #[arg(long, default_value = "UTC", value_parser = parse_tz)]
    tz: Tz,
    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,
}

fn parse_tz(s: &str) -> Result<Tz, String> {
    s.parse::<Tz>().map_err(|e| e.to_string())
}

fn minutes(flag: &str, m: u64) -> Result<Duration, SpotLiftError> {
    m.checked_mul(60)
        .map(Duration::from_secs)
        .ok_or_else(|| SpotLiftError::InvalidArg(format!("{flag} {m} is out of range")))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Suggested: RUST_LOG=info,spotlift=debug
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();

    let args = Args::parse();

    let engine = SpotLift::builder()
        .baseline_window(minutes("--baseline-minutes", args.baseline_minutes)?)
        .lift_window(minutes("--lift-minutes", args.lift_minutes)?)
        .max_lookback(minutes("--max-lookback-minutes", args.max_lookback_minutes)?)
        .traffic_source(args.source)
        .build()?;

    let csv = CsvSource::with_timezone(args.tz);
    let traffic = csv.load_traffic(&args.traffic)?;
    let spots = csv.load_spots(&args.spots)?;
    tracing::info!(traffic = traffic.len(), spots = spots.len(), "inputs loaded");

    let store = Arc::new(engine.store(traffic, spots)?);
    let report = engine.attribute_all_concurrent(Arc::clone(&store)).await?;
    let creatives = engine.creative_summaries(&store, &report);

    let mut out = std::io::stdout().lock();
    match args.format {
        Format::Table => render::table(&mut out, &report, &creatives)?,
        Format::Json => render::json(&mut out, &report, &creatives)?,
    }
    Ok(())
}
