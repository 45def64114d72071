//! Duration command implementation.
//!
//! The duration command:
//! 1. Loads per-status intervals from the trace
//! 2. Coalesces and totals them
//! 3. Prints the aggregate report
//! 4. Optionally writes a JSON report

use super::models::DurationArgs;
use crate::aggregator::{total_duration_by_group, GroupTotals};
use crate::output::{aggregate_report, write_report, DurationReport};
use crate::parser::load_intervals_from_path;
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::Path;
use std::time::Instant;

/// Compute per-status busy time for a trace file
///
/// **Public** - library entry point for collaborators that embed the
/// summary in other text
///
/// # Returns
/// `(totals, message)` where `message` is the rendered aggregate report
///
/// # Errors
/// * Trace file missing or unreadable
/// * Required trace column missing
pub fn calculate_trace_duration(trace_file: impl AsRef<Path>) -> Result<(GroupTotals, String)> {
    let trace_file = trace_file.as_ref();

    let groups = load_intervals_from_path(trace_file, None)
        .with_context(|| format!("Failed to load trace {}", trace_file.display()))?;

    let totals = total_duration_by_group(&groups);
    for group in &totals.groups {
        debug!(
            "{}: {} spans from {} intervals ({}s before merging)",
            group.key,
            group.spans,
            group.intervals,
            group.naive_duration.num_seconds()
        );
    }

    let message = aggregate_report(&totals);
    Ok((totals, message))
}

/// Execute the duration command
///
/// **Public** - main entry point called from main.rs
pub fn execute_duration(args: DurationArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Computing execution time for: {}", args.trace_file.display());

    let (totals, message) = calculate_trace_duration(&args.trace_file)?;
    println!("{}", message);

    if let Some(output_json) = &args.output_json {
        let report = DurationReport::from_totals(args.trace_file.display().to_string(), &totals);
        write_report(&report, output_json).context("Failed to write JSON report")?;
        info!("✓ Report written to: {}", output_json.display());
    }

    info!(
        "Duration computed in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );

    Ok(())
}
