//! Merge overlapping execution intervals into contiguous busy spans.
//!
//! Tasks run concurrently and get retried, so summing raw task durations
//! over-counts. Coalescing first turns a group's intervals into the
//! periods during which at least one task was running.
//!
//! Example: `(00:00,01:00) (00:30,02:00) (03:00,04:00)` becomes
//! `(00:00,02:00) (03:00,04:00)`, three hours of busy time.

use crate::parser::schema::{Interval, Span};
use chrono::TimeDelta;
use log::debug;

/// Coalesce intervals into maximal contiguous spans
///
/// **Public** - main entry point for merging
///
/// # Arguments
/// * `intervals` - Intervals in any order; duplicates are harmless
///
/// # Returns
/// Spans sorted by start, pairwise non-overlapping
///
/// # Algorithm
/// 1. Sort by start
/// 2. The first interval opens the current span
/// 3. An interval starting strictly after the current end closes the
///    span and opens a new one
/// 4. Otherwise the current end grows to cover the interval. Touching
///    endpoints count as overlap, so zero idle gap stays one span
/// 5. The last open span is emitted at the end
pub fn coalesce<'a, I>(intervals: I) -> Vec<Span>
where
    I: IntoIterator<Item = &'a Interval>,
{
    let mut sorted: Vec<Interval> = intervals.into_iter().copied().collect();
    sorted.sort_by_key(|interval| interval.start);

    let mut spans = Vec::new();
    let mut current: Option<Span> = None;

    for interval in sorted {
        match current.as_mut() {
            Some(span) if interval.start <= span.end => {
                if interval.end > span.end {
                    span.end = interval.end;
                }
            }
            Some(span) => {
                spans.push(*span);
                *span = interval;
            }
            None => current = Some(interval),
        }
    }
    spans.extend(current);

    debug!("Coalesced into {} spans", spans.len());

    spans
}

/// Sum of span durations
pub fn total_span_duration(spans: &[Span]) -> TimeDelta {
    spans
        .iter()
        .fold(TimeDelta::zero(), |total, span| total + span.duration())
}

/// Coalesce and sum in one step
///
/// **Public** - busy time for one group of intervals
pub fn merged_duration<'a, I>(intervals: I) -> TimeDelta
where
    I: IntoIterator<Item = &'a Interval>,
{
    total_span_duration(&coalesce(intervals))
}

/// Sum of raw interval durations, without merging
///
/// Upper bound for [`merged_duration`]; useful to report how much overlap
/// the trace contained.
pub fn naive_duration<'a, I>(intervals: I) -> TimeDelta
where
    I: IntoIterator<Item = &'a Interval>,
{
    intervals
        .into_iter()
        .fold(TimeDelta::zero(), |total, interval| total + interval.duration())
}
