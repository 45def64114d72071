//! Output writers for duration reports.
//!
//! This module handles:
//! - Human readable and raw-seconds duration rendering
//! - Aggregate and per-sample text reports
//! - JSON reports written to disk

pub mod json;
pub mod report;

// Re-export main functions
pub use json::{read_report, write_json, write_report, DurationReport, StatusDuration};
pub use report::{
    aggregate_report, format_duration, format_seconds, sample_report, DurationStyle,
};
