//! Trace Tempo
//!
//! Wall-clock execution time for workflow runs, computed from the
//! runner's tab-delimited trace file.
//!
//! Tasks run concurrently and are retried, so the trace holds many
//! overlapping `(submit, complete)` windows. Summing them over-counts;
//! this crate coalesces overlapping windows into contiguous busy periods
//! first and sums those instead, per status and per sample.
//!
//! ## Getting Started
//!
//! ```bash
//! tempo duration trace.txt
//! tempo samples trace.txt --samples samples.tsv
//! ```
//!
//! As a library:
//!
//! ```ignore
//! let (totals, message) = trace_tempo::calculate_trace_duration("trace.txt")?;
//! println!("{}", message);
//! ```

pub mod aggregator;
pub mod commands;
pub mod notify;
pub mod output;
pub mod parser;
pub mod utils;

pub use commands::{calculate_sample_durations, calculate_trace_duration};
