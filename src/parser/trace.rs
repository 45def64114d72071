//! Loader for the workflow runner's tab-delimited trace file.
//!
//! Reads the header, locates the columns we need, and turns every row
//! into a [`TraceRecord`]. Rows whose timestamps do not parse are kept as
//! records with `None` timestamps; the loaders below drop them when
//! collecting intervals.

use super::schema::{IntervalGroups, SampleGroups, TraceRecord};
use crate::utils::config::{
    COMPLETE_COLUMN, FIELD_DELIMITER, STATUS_COLUMN, SUBMIT_COLUMN, TAG_COLUMN, TIMESTAMP_FORMAT,
};
use crate::utils::error::ParseError;
use chrono::NaiveDateTime;
use log::{debug, warn};
use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

/// Record filter evaluated against a row's `tag` column
///
/// A record matches when every substring appears somewhere in its tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFilter {
    substrings: Vec<String>,
}

impl TagFilter {
    pub fn new<I, S>(substrings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            substrings: substrings.into_iter().map(Into::into).collect(),
        }
    }

    pub fn matches(&self, tag: &str) -> bool {
        self.substrings.iter().all(|s| tag.contains(s.as_str()))
    }
}

/// Positions of the required columns within a row
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    status: usize,
    submit: usize,
    complete: usize,
    tag: Option<usize>,
}

impl ColumnIndex {
    fn from_header(header: &str, require_tag: bool) -> Result<Self, ParseError> {
        let names: Vec<&str> = split_fields(header).collect();
        let find = |column: &str| {
            names
                .iter()
                .position(|name| *name == column)
                .ok_or_else(|| ParseError::MissingColumn {
                    column: column.to_string(),
                })
        };

        let tag = match find(TAG_COLUMN) {
            Ok(index) => Some(index),
            Err(e) if require_tag => return Err(e),
            Err(_) => None,
        };

        Ok(Self {
            status: find(STATUS_COLUMN)?,
            submit: find(SUBMIT_COLUMN)?,
            complete: find(COMPLETE_COLUMN)?,
            tag,
        })
    }
}

/// Streaming reader over trace rows
///
/// **Public** - lets callers walk the records themselves
pub struct TraceReader<R> {
    lines: Lines<R>,
    columns: ColumnIndex,
}

impl<R: BufRead> TraceReader<R> {
    /// Read the header row and resolve column positions
    ///
    /// # Errors
    /// * `ParseError::EmptyInput` - no header row
    /// * `ParseError::MissingColumn` - `status`, `submit` or `complete`
    ///   absent, or `tag` absent while `require_tag` is set
    pub fn new(source: R, require_tag: bool) -> Result<Self, ParseError> {
        let mut lines = source.lines();
        let header = lines.next().ok_or(ParseError::EmptyInput)??;
        let columns = ColumnIndex::from_header(&header, require_tag)?;

        Ok(Self { lines, columns })
    }

    fn parse_row(&self, line: &str) -> TraceRecord {
        let fields: Vec<&str> = split_fields(line).collect();
        let field = |index: usize| fields.get(index).copied().unwrap_or("");

        TraceRecord {
            status: field(self.columns.status).to_string(),
            tag: self.columns.tag.map(|index| field(index).to_string()),
            submit: parse_timestamp(field(self.columns.submit)),
            complete: parse_timestamp(field(self.columns.complete)),
        }
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceRecord, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            if line.trim().is_empty() {
                continue;
            }
            return Some(Ok(self.parse_row(&line)));
        }
    }
}

/// Parse a trace timestamp (`YYYY-MM-DD HH:MM:SS.ffffff`)
///
/// **Public** - returns `None` for anything else, including the `-`
/// placeholder. The fraction must be 1-6 digits; surrounding whitespace
/// is not accepted.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let (clock, fraction) = value.rsplit_once('.')?;
    if !matches_layout(clock) {
        return None;
    }
    if fraction.is_empty() || fraction.len() > 6 || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).ok()
}

/// Check the fixed `YYYY-MM-DD HH:MM:SS` shape before handing off to chrono,
/// which would otherwise accept single-digit fields and extra whitespace
fn matches_layout(clock: &str) -> bool {
    const LAYOUT: &[u8; 19] = b"dddd-dd-dd dd:dd:dd";

    clock.len() == LAYOUT.len()
        && clock.bytes().zip(LAYOUT.iter()).all(|(b, &expected)| match expected {
            b'd' => b.is_ascii_digit(),
            other => b == other,
        })
}

/// Load per-status interval sets from a trace stream
///
/// **Public** - main entry point for the aggregate report
///
/// # Arguments
/// * `source` - Tab-delimited trace with a header row
/// * `filter` - Optional tag filter; only matching rows are kept
///
/// # Returns
/// Status -> deduplicated intervals, in first-seen status order. A status
/// whose rows all lacked timestamps is present with an empty set.
///
/// # Errors
/// * `ParseError::MissingColumn` - required column absent (`tag` is only
///   required when a filter is given)
/// * `ParseError::Io` - read failure
pub fn load_intervals<R: BufRead>(
    source: R,
    filter: Option<&TagFilter>,
) -> Result<IntervalGroups, ParseError> {
    let reader = TraceReader::new(source, filter.is_some())?;
    let mut groups = IntervalGroups::new();
    let mut rows = 0usize;
    let mut skipped = 0usize;

    for record in reader {
        let record = record?;
        rows += 1;

        if let Some(filter) = filter {
            if !filter.matches(record.tag.as_deref().unwrap_or("")) {
                continue;
            }
        }

        let set = groups.entry(&record.status);
        match record.interval() {
            Some(interval) => {
                set.insert(interval);
            }
            None => skipped += 1,
        }
    }

    debug!(
        "Loaded {} intervals across {} statuses from {} rows ({} without timestamps)",
        groups.interval_count(),
        groups.len(),
        rows,
        skipped
    );

    if rows > 0 && groups.interval_count() == 0 && filter.is_none() {
        warn!("Trace has {} rows but none with usable timestamps", rows);
    }

    Ok(groups)
}

/// Load interval sets for every sample in a single pass over the trace
///
/// **Public** - entry point for the per-sample report
///
/// Each row is parsed once and bucketed under every sample whose id
/// appears in its tag, then under its status. Every sample is present in
/// the result, with no statuses if nothing matched it.
///
/// # Errors
/// * `ParseError::MissingColumn` - `tag` or another required column absent
/// * `ParseError::Io` - read failure
pub fn load_sample_intervals<R: BufRead>(
    source: R,
    samples: &[String],
) -> Result<SampleGroups, ParseError> {
    let reader = TraceReader::new(source, true)?;
    let filters: Vec<(&str, TagFilter)> = samples
        .iter()
        .map(|sample| (sample.as_str(), TagFilter::new([sample.as_str()])))
        .collect();

    let mut buckets = SampleGroups::new();
    for (sample, _) in &filters {
        buckets.entry(sample);
    }

    for record in reader {
        let record = record?;
        let tag = record.tag.as_deref().unwrap_or("");
        let interval = record.interval();

        for (sample, filter) in &filters {
            if !filter.matches(tag) {
                continue;
            }
            let set = buckets.entry(sample).entry(&record.status);
            if let Some(interval) = interval {
                set.insert(interval);
            }
        }
    }

    debug!("Bucketed trace rows into {} samples", buckets.len());

    Ok(buckets)
}

/// Open a trace file and load per-status intervals
///
/// **Public** - convenience wrapper around [`load_intervals`]
pub fn load_intervals_from_path(
    path: impl AsRef<Path>,
    filter: Option<&TagFilter>,
) -> Result<IntervalGroups, ParseError> {
    let path = path.as_ref();
    debug!("Reading trace from: {}", path.display());
    let file = File::open(path)?;
    load_intervals(BufReader::new(file), filter)
}

/// Open a trace file and bucket its intervals per sample
///
/// **Public** - convenience wrapper around [`load_sample_intervals`]
pub fn load_sample_intervals_from_path(
    path: impl AsRef<Path>,
    samples: &[String],
) -> Result<SampleGroups, ParseError> {
    let path = path.as_ref();
    debug!("Reading trace from: {}", path.display());
    let file = File::open(path)?;
    load_sample_intervals(BufReader::new(file), samples)
}

/// Split a line on the field delimiter, dropping a trailing carriage return
///
/// One pair of surrounding double quotes is removed from each field.
/// Delimiters inside quotes are not supported.
pub(crate) fn split_fields(line: &str) -> impl Iterator<Item = &str> {
    line.trim_end_matches(['\r', '\n'])
        .split(FIELD_DELIMITER)
        .map(unquote)
}

fn unquote(field: &str) -> &str {
    field
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::Interval;
    use std::io::Cursor;

    const HEADER: &str = "task_id\tstatus\ttag\tsubmit\tcomplete";

    fn trace(rows: &[&str]) -> Cursor<String> {
        let mut text = String::from(HEADER);
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        Cursor::new(text)
    }

    fn ts(value: &str) -> NaiveDateTime {
        parse_timestamp(value).unwrap()
    }

    #[test]
    fn test_parse_timestamp() {
        let parsed = parse_timestamp("2020-04-24 21:22:31.512345").unwrap();
        assert_eq!(parsed.to_string(), "2020-04-24 21:22:31.512345");

        // Millisecond precision is read as a left-aligned fraction
        let parsed = parse_timestamp("2020-04-24 21:22:31.512").unwrap();
        assert_eq!(parsed.to_string(), "2020-04-24 21:22:31.512");
    }

    #[test]
    fn test_parse_timestamp_rejects_placeholders() {
        assert!(parse_timestamp("-").is_none());
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("2020-04-24 21:22:31").is_none());
        assert!(parse_timestamp("24/04/2020 21:22:31.000").is_none());
    }

    #[test]
    fn test_parse_timestamp_rejects_nonconforming_layout() {
        // More than microsecond precision
        assert!(parse_timestamp("2020-04-24 21:22:31.1234567").is_none());
        assert!(parse_timestamp("2020-04-24 21:22:31.123456789012").is_none());
        // Surrounding whitespace
        assert!(parse_timestamp(" 2020-04-24 21:22:31.5").is_none());
        assert!(parse_timestamp("2020-04-24 21:22:31.5 ").is_none());
        // Empty or non-digit fraction
        assert!(parse_timestamp("2020-04-24 21:22:31.").is_none());
        assert!(parse_timestamp("2020-04-24 21:22:31.5a").is_none());
        // Short fields and doubled separators
        assert!(parse_timestamp("2020-4-24 21:22:31.500").is_none());
        assert!(parse_timestamp("2020-04-24  1:22:31.500").is_none());

        assert!(parse_timestamp("2020-04-24 21:22:31.5").is_some());
        assert!(parse_timestamp("2020-04-24 21:22:31.123456").is_some());
    }

    #[test]
    fn test_overprecise_timestamp_row_is_dropped() {
        let groups = load_intervals(
            trace(&[
                "1\tCOMPLETED\ta\t2020-01-01 00:00:00.1234567\t2020-01-01 01:00:00.000",
                "2\tCOMPLETED\ta\t2020-01-01 02:00:00.000\t2020-01-01 03:00:00.000",
            ]),
            None,
        )
        .unwrap();

        assert_eq!(groups.get("COMPLETED").unwrap().len(), 1);
    }

    #[test]
    fn test_quoted_fields_are_unquoted() {
        let text = "\"status\"\t\"tag\"\t\"submit\"\t\"complete\"\n\
                    \"COMPLETED\"\t\"S1.align\"\t\"2020-01-01 00:00:00.000\"\t\"2020-01-01 01:00:00.000\"\n";
        let samples = vec!["S1".to_string()];
        let buckets = load_sample_intervals(Cursor::new(text), &samples).unwrap();

        let groups = buckets.get("S1").unwrap();
        assert_eq!(groups.keys().collect::<Vec<_>>(), vec!["COMPLETED"]);
        assert_eq!(groups.interval_count(), 1);
    }

    #[test]
    fn test_load_intervals_groups_by_status() {
        let groups = load_intervals(
            trace(&[
                "1\tCOMPLETED\ta\t2020-01-01 00:00:00.000\t2020-01-01 01:00:00.000",
                "2\tFAILED\ta\t2020-01-01 00:10:00.000\t2020-01-01 00:20:00.000",
                "3\tCOMPLETED\tb\t2020-01-01 02:00:00.000\t2020-01-01 03:00:00.000",
            ]),
            None,
        )
        .unwrap();

        let keys: Vec<&str> = groups.keys().collect();
        assert_eq!(keys, vec!["COMPLETED", "FAILED"]);
        assert_eq!(groups.get("COMPLETED").unwrap().len(), 2);
        assert_eq!(groups.get("FAILED").unwrap().len(), 1);
    }

    #[test]
    fn test_load_intervals_skips_placeholder_rows() {
        let groups = load_intervals(
            trace(&[
                "1\tCOMPLETED\ta\t2020-01-01 00:00:00.000\t2020-01-01 01:00:00.000",
                "2\tABORTED\ta\t-\t-",
                "3\tCOMPLETED\ta\t-\t2020-01-01 05:00:00.000",
            ]),
            None,
        )
        .unwrap();

        assert_eq!(groups.get("COMPLETED").unwrap().len(), 1);
        // The status is still seen, just with nothing to count
        assert!(groups.get("ABORTED").unwrap().is_empty());
    }

    #[test]
    fn test_load_intervals_deduplicates() {
        let row = "1\tCACHED\ta\t2020-01-01 00:00:00.000\t2020-01-01 01:00:00.000";
        let groups = load_intervals(trace(&[row, row, row]), None).unwrap();
        assert_eq!(groups.interval_count(), 1);
    }

    #[test]
    fn test_load_intervals_with_filter() {
        let filter = TagFilter::new(["Sample1", "tumor"]);
        let groups = load_intervals(
            trace(&[
                "1\tCOMPLETED\tSample1.tumor\t2020-01-01 00:00:00.000\t2020-01-01 01:00:00.000",
                "2\tCOMPLETED\tSample1.normal\t2020-01-01 02:00:00.000\t2020-01-01 03:00:00.000",
                "3\tCOMPLETED\tSample2.tumor\t2020-01-01 04:00:00.000\t2020-01-01 05:00:00.000",
            ]),
            Some(&filter),
        )
        .unwrap();

        let set = groups.get("COMPLETED").unwrap();
        assert_eq!(set.len(), 1);
        assert!(set.contains(&Interval::new(
            ts("2020-01-01 00:00:00.000"),
            ts("2020-01-01 01:00:00.000")
        )));
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let source = Cursor::new("status\tsubmit\n1\t2020-01-01 00:00:00.000");
        let err = load_intervals(source, None).unwrap_err();
        assert!(matches!(err, ParseError::MissingColumn { ref column } if column == "complete"));
    }

    #[test]
    fn test_tag_only_required_when_filtering() {
        let text = "status\tsubmit\tcomplete\nCOMPLETED\t2020-01-01 00:00:00.000\t2020-01-01 00:00:01.000";
        assert!(load_intervals(Cursor::new(text), None).is_ok());

        let filter = TagFilter::new(["x"]);
        let err = load_intervals(Cursor::new(text), Some(&filter)).unwrap_err();
        assert!(matches!(err, ParseError::MissingColumn { ref column } if column == "tag"));
    }

    #[test]
    fn test_empty_input_is_error() {
        let err = load_intervals(Cursor::new(""), None).unwrap_err();
        assert!(matches!(err, ParseError::EmptyInput));
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = "status\tsubmit\tcomplete\r\nCOMPLETED\t2020-01-01 00:00:00.000\t2020-01-01 00:00:01.000\r\n";
        let groups = load_intervals(Cursor::new(text), None).unwrap();
        assert_eq!(groups.get("COMPLETED").unwrap().len(), 1);
    }

    #[test]
    fn test_load_sample_intervals_single_pass() {
        let samples = vec!["S1".to_string(), "S2".to_string(), "S3".to_string()];
        let buckets = load_sample_intervals(
            trace(&[
                "1\tCOMPLETED\tS1.align\t2020-01-01 00:00:00.000\t2020-01-01 01:00:00.000",
                "2\tFAILED\tS2.align\t2020-01-01 00:00:00.000\t2020-01-01 00:30:00.000",
                "3\tCOMPLETED\tS1_S2.pair\t2020-01-01 02:00:00.000\t2020-01-01 03:00:00.000",
            ]),
            &samples,
        )
        .unwrap();

        let keys: Vec<&str> = buckets.keys().collect();
        assert_eq!(keys, vec!["S1", "S2", "S3"]);
        assert_eq!(buckets.get("S1").unwrap().interval_count(), 2);
        assert_eq!(buckets.get("S2").unwrap().interval_count(), 2);
        assert!(buckets.get("S3").unwrap().is_empty());
    }
}
