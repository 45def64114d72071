//! Aggregation of trace intervals into busy-time totals.
//!
//! This module transforms loaded interval groups into:
//! - Coalesced spans (overlapping tasks merged)
//! - Per-status and overall busy time
//! - Sample rankings by busy time

pub mod coalesce;
pub mod metrics;

// Re-export main types and functions
pub use coalesce::{coalesce, merged_duration, naive_duration, total_span_duration};
pub use metrics::{rank_by_total, total_duration_by_group, GroupTotal, GroupTotals};
