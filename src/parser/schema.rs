//! Data model shared by the trace loader and the aggregator.
//!
//! Intervals are plain timestamp pairs. Groups keep the order in which
//! their keys were first seen, so reports come out in trace order.

use chrono::{NaiveDateTime, TimeDelta};
use std::collections::{BTreeSet, HashMap};

/// A `(start, end)` execution window taken from one trace row
///
/// `start <= end` is assumed from the input and not checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Interval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Interval {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// Elapsed time between start and end
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }
}

/// One maximal contiguous busy period produced by coalescing
pub type Span = Interval;

/// Deduplicated intervals for a single group
pub type IntervalSet = BTreeSet<Interval>;

/// Status label -> intervals observed with that status
pub type IntervalGroups = GroupMap<IntervalSet>;

/// Sample id -> status label -> intervals
pub type SampleGroups = GroupMap<IntervalGroups>;

/// One row of the trace, after column lookup
///
/// Timestamps are `None` when the raw value did not parse
/// (e.g. the `-` placeholder for tasks that never ran).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceRecord {
    pub status: String,
    pub tag: Option<String>,
    pub submit: Option<NaiveDateTime>,
    pub complete: Option<NaiveDateTime>,
}

impl TraceRecord {
    /// The record's interval, if both timestamps parsed
    pub fn interval(&self) -> Option<Interval> {
        Some(Interval::new(self.submit?, self.complete?))
    }
}

/// String-keyed map that iterates in first-insertion order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupMap<V> {
    order: Vec<String>,
    entries: HashMap<String, V>,
}

impl<V> Default for GroupMap<V> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            entries: HashMap::new(),
        }
    }
}

impl<V: Default> GroupMap<V> {
    /// Get the value for `key`, registering the key with a default value
    /// on first sight
    pub fn entry(&mut self, key: &str) -> &mut V {
        if !self.entries.contains_key(key) {
            self.order.push(key.to_string());
        }
        self.entries.entry(key.to_string()).or_default()
    }
}

impl<V> GroupMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Keys in first-seen order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// `(key, value)` pairs in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.order
            .iter()
            .filter_map(|key| self.entries.get(key).map(|value| (key.as_str(), value)))
    }
}

impl GroupMap<IntervalSet> {
    /// Add an interval under `key`; returns false if it was already present
    pub fn insert(&mut self, key: &str, interval: Interval) -> bool {
        self.entry(key).insert(interval)
    }

    /// Number of distinct intervals across all groups
    pub fn interval_count(&self) -> usize {
        self.entries.values().map(BTreeSet::len).sum()
    }
}
