//! Trace parsing and the interval data model.
//!
//! This module handles:
//! - Reading the tab-delimited trace and resolving its columns
//! - Parsing task timestamps and skipping rows without them
//! - Grouping deduplicated intervals by status, or by sample then status
//! - Reading the sample list
//! - Converting human readable memory sizes to bytes

pub mod samples;
pub mod schema;
pub mod size;
pub mod trace;

// Re-export main types
pub use samples::{load_sample_ids, load_sample_ids_from_path};
pub use schema::{
    GroupMap, Interval, IntervalGroups, IntervalSet, SampleGroups, Span, TraceRecord,
};
pub use size::parse_size;
pub use trace::{
    load_intervals, load_intervals_from_path, load_sample_intervals,
    load_sample_intervals_from_path, parse_timestamp, TagFilter, TraceReader,
};
