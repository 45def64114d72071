//! Busy-time totals per group and sample rankings.
//!
//! Each group (a status label) is coalesced on its own and its spans
//! summed. Per-sample totals are the sum of that sample's status totals.

use super::coalesce::{coalesce, naive_duration, total_span_duration};
use crate::parser::schema::{IntervalGroups, SampleGroups};
use chrono::TimeDelta;
use log::debug;

/// Busy time for a single group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupTotal {
    /// Group key (status label)
    pub key: String,

    /// Sum of coalesced span durations
    pub duration: TimeDelta,

    /// Distinct intervals before merging
    pub intervals: usize,

    /// Spans after merging
    pub spans: usize,

    /// Sum of raw interval durations before merging
    pub naive_duration: TimeDelta,
}

/// Per-group totals plus grand totals
///
/// **Public** - returned from [`total_duration_by_group`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupTotals {
    /// One entry per group, in first-seen order
    pub groups: Vec<GroupTotal>,

    /// Sum of all group durations
    pub total: TimeDelta,

    /// Sum of all group interval counts
    pub total_intervals: usize,
}

impl Default for GroupTotals {
    fn default() -> Self {
        Self {
            groups: Vec::new(),
            total: TimeDelta::zero(),
            total_intervals: 0,
        }
    }
}

impl GroupTotals {
    pub fn get(&self, key: &str) -> Option<&GroupTotal> {
        self.groups.iter().find(|group| group.key == key)
    }

    /// Duration for `key`; zero when the group is absent
    pub fn duration_of(&self, key: &str) -> TimeDelta {
        self.get(key)
            .map(|group| group.duration)
            .unwrap_or_else(TimeDelta::zero)
    }

    /// Interval count for `key`; zero when the group is absent
    pub fn intervals_of(&self, key: &str) -> usize {
        self.get(key).map(|group| group.intervals).unwrap_or(0)
    }
}

/// Coalesce and total every group
///
/// **Public** - main entry point for the aggregate report
///
/// # Arguments
/// * `groups` - Status -> intervals, as produced by the trace loader
///
/// # Returns
/// Per-group durations and pre-merge interval counts, plus grand totals.
/// Empty groups yield zero duration and zero count.
pub fn total_duration_by_group(groups: &IntervalGroups) -> GroupTotals {
    let mut totals = GroupTotals::default();

    for (key, intervals) in groups.iter() {
        let spans = coalesce(intervals);
        let duration = total_span_duration(&spans);

        debug!(
            "{}: {} intervals -> {} spans, {}s busy",
            key,
            intervals.len(),
            spans.len(),
            duration.num_seconds()
        );

        totals.total = totals.total + duration;
        totals.total_intervals += intervals.len();
        totals.groups.push(GroupTotal {
            key: key.to_string(),
            duration,
            intervals: intervals.len(),
            spans: spans.len(),
            naive_duration: naive_duration(intervals),
        });
    }

    totals
}

/// Rank samples by total busy time
///
/// **Public** - main entry point for the per-sample report
///
/// # Arguments
/// * `samples` - Sample -> status -> intervals
///
/// # Returns
/// `(sample, duration)` sorted by duration, descending. Samples with equal
/// durations keep their order from `samples`. Samples with no intervals
/// are included with zero duration.
pub fn rank_by_total(samples: &SampleGroups) -> Vec<(String, TimeDelta)> {
    let mut ranked: Vec<(String, TimeDelta)> = samples
        .iter()
        .map(|(sample, groups)| (sample.to_string(), total_duration_by_group(groups).total))
        .collect();

    // Stable sort keeps sample order for ties
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    debug!("Ranked {} samples", ranked.len());

    ranked
}
