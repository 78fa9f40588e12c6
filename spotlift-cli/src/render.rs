use std::io::{self, Write};

use serde::Serialize;
use spotlift::{AttributionReport, CreativeSummary};

fn opt(v: Option<f64>) -> String {
    v.map_or_else(|| "-".to_string(), |x| format!("{x:.2}"))
}

pub fn table<W: Write>(
    out: &mut W,
    report: &AttributionReport,
    creatives: &[CreativeSummary],
) -> io::Result<()> {
    writeln!(
        out,
        "{:<26} {:<14} {:>10} {:>10} {:>8}",
        "SPOT", "CREATIVE", "BASELINE", "LIFT", "OVERLAPS"
    )?;
    for r in report.results.values() {
        writeln!(
            out,
            "{:<26} {:<14} {:>10} {:>10} {:>8}",
            r.ts.to_rfc3339(),
            r.creative_id.as_str(),
            opt(r.baseline),
            opt(r.lift),
            r.breakdown.segments.len(),
        )?;
    }

    if !report.failures.is_empty() {
        writeln!(out)?;
        writeln!(out, "FAILED")?;
        for f in &report.failures {
            writeln!(out, "{}  {}", f.key, f.error)?;
        }
    }
    if !report.warnings.is_empty() {
        writeln!(out)?;
        writeln!(out, "WARNINGS")?;
        for w in &report.warnings {
            writeln!(out, "{w}")?;
        }
    }

    writeln!(out)?;
    writeln!(
        out,
        "{:<14} {:>6} {:>12} {:>10} {:>6} {:>10}",
        "CREATIVE", "SPOTS", "SPEND", "LIFT", "NONE", "COST/VISIT"
    )?;
    for c in creatives {
        let cpv = c
            .cost_per_visit
            .map_or_else(|| "-".to_string(), |d| format!("{d:.2}"));
        writeln!(
            out,
            "{:<14} {:>6} {:>12} {:>10.2} {:>6} {:>10}",
            c.creative_id.as_str(),
            c.spots,
            format!("{:.2}", c.spend),
            c.total_lift,
            c.unattributed,
            cpv,
        )?;
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    report: &'a AttributionReport,
    creatives: &'a [CreativeSummary],
}

pub fn json<W: Write>(
    out: &mut W,
    report: &AttributionReport,
    creatives: &[CreativeSummary],
) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, &JsonOutput { report, creatives })?;
    writeln!(out)
}
