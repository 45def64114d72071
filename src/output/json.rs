//! JSON report output writer.
//!
//! Writes DurationReport structs to JSON files with proper formatting.

use super::report::{format_duration, format_seconds};
use crate::aggregator::GroupTotals;
use crate::utils::config::SCHEMA_VERSION;
use crate::utils::error::OutputError;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Top-level report structure written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DurationReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Trace file the report was computed from
    pub trace_file: String,

    /// Busy time per status, in first-seen order
    pub statuses: Vec<StatusDuration>,

    /// Total busy time across statuses (human readable)
    pub total: String,

    /// Total busy time in seconds
    pub total_seconds: String,

    /// Distinct intervals across statuses
    pub total_intervals: usize,

    /// Timestamp when the report was generated
    pub generated_at: String,
}

/// Busy time for one status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusDuration {
    pub status: String,
    pub duration: String,
    pub duration_seconds: String,
    pub intervals: usize,
    pub spans: usize,
}

impl DurationReport {
    /// Build a report from aggregate totals
    pub fn from_totals(trace_file: impl Into<String>, totals: &GroupTotals) -> Self {
        use chrono::Utc;

        Self {
            version: SCHEMA_VERSION.to_string(),
            trace_file: trace_file.into(),
            statuses: totals
                .groups
                .iter()
                .map(|group| StatusDuration {
                    status: group.key.clone(),
                    duration: format_duration(group.duration),
                    duration_seconds: format_seconds(group.duration),
                    intervals: group.intervals,
                    spans: group.spans,
                })
                .collect(),
            total: format_duration(totals.total),
            total_seconds: format_seconds(totals.total),
            total_intervals: totals.total_intervals,
            generated_at: Utc::now().to_rfc3339(),
        }
    }
}

/// Write a report to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_report(
    report: &DurationReport,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing report to: {}", output_path.display());

    write_json(report, output_path)?;

    info!(
        "Report written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Serialize any value as pretty JSON, creating parent directories
///
/// **Public** - shared with the pipeline config sidecar
pub fn write_json<T: Serialize>(value: &T, output_path: &Path) -> Result<(), OutputError> {
    validate_output_path(output_path)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, value).map_err(OutputError::SerializationFailed)?;

    Ok(())
}

/// Validate that output path is writable
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Calculate file size in bytes
///
/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Read a report from a JSON file
///
/// **Public** - useful for validation and testing
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_report(input_path: impl AsRef<Path>) -> Result<DurationReport, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading report from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;

    let report: DurationReport =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Report loaded: version {}, trace {}",
        report.version, report.trace_file
    );

    Ok(report)
}
