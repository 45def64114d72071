//! Samples command implementation.
//!
//! Ranks the samples of a run by how much busy time their tasks used.

use super::models::SamplesArgs;
use crate::aggregator::rank_by_total;
use crate::output::{sample_report, DurationStyle};
use crate::parser::{load_sample_ids_from_path, load_sample_intervals_from_path};
use anyhow::{Context, Result};
use chrono::TimeDelta;
use log::{info, warn};
use std::path::Path;

/// Compute and rank busy time per sample
///
/// **Public** - library entry point for collaborators
///
/// The sample list is read first, so a missing list fails before the
/// trace is touched.
///
/// # Returns
/// `(ranked, message)`: samples by descending busy time and the rendered
/// per-sample report
pub fn calculate_sample_durations(
    trace_file: impl AsRef<Path>,
    samples_file: impl AsRef<Path>,
    style: DurationStyle,
) -> Result<(Vec<(String, TimeDelta)>, String)> {
    let trace_file = trace_file.as_ref();
    let samples_file = samples_file.as_ref();

    let samples = load_sample_ids_from_path(samples_file)
        .with_context(|| format!("Failed to load sample list {}", samples_file.display()))?;
    if samples.is_empty() {
        warn!("Sample list {} has no samples", samples_file.display());
    }

    let buckets = load_sample_intervals_from_path(trace_file, &samples)
        .with_context(|| format!("Failed to load trace {}", trace_file.display()))?;

    let ranked = rank_by_total(&buckets);
    let message = sample_report(&ranked, style);

    Ok((ranked, message))
}

/// Execute the samples command
///
/// **Public** - main entry point called from main.rs
pub fn execute_samples(args: SamplesArgs) -> Result<()> {
    info!(
        "Ranking samples from {} in {}",
        args.samples_file.display(),
        args.trace_file.display()
    );

    let (ranked, message) =
        calculate_sample_durations(&args.trace_file, &args.samples_file, args.style)?;

    if !message.is_empty() {
        println!("{}", message);
    }

    info!("Ranked {} samples", ranked.len());

    Ok(())
}
