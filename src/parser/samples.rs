//! Sample list reader.
//!
//! The sample list is a tab-delimited file with a `SAMPLE` column. Its
//! distinct values, in first-seen order, are the sample ids used to split
//! the trace.

use super::trace::split_fields;
use crate::utils::config::SAMPLE_COLUMN;
use crate::utils::error::ParseError;
use log::debug;
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read distinct sample ids from a sample list stream
///
/// Blank values are ignored since they would match every tag.
///
/// # Errors
/// * `ParseError::EmptyInput` - no header row
/// * `ParseError::MissingColumn` - header has no `SAMPLE` column
pub fn load_sample_ids<R: BufRead>(source: R) -> Result<Vec<String>, ParseError> {
    let mut lines = source.lines();
    let header = lines.next().ok_or(ParseError::EmptyInput)??;
    let column = split_fields(&header)
        .position(|name| name == SAMPLE_COLUMN)
        .ok_or_else(|| ParseError::MissingColumn {
            column: SAMPLE_COLUMN.to_string(),
        })?;

    let mut seen = HashSet::new();
    let mut samples = Vec::new();
    for line in lines {
        let line = line?;
        let Some(sample) = split_fields(&line).nth(column).map(str::trim) else {
            continue;
        };
        if !sample.is_empty() && seen.insert(sample.to_string()) {
            samples.push(sample.to_string());
        }
    }

    debug!("Loaded {} distinct samples", samples.len());

    Ok(samples)
}

/// Open a sample list file and read its sample ids
pub fn load_sample_ids_from_path(path: impl AsRef<Path>) -> Result<Vec<String>, ParseError> {
    let path = path.as_ref();
    debug!("Reading sample list from: {}", path.display());
    let file = File::open(path)?;
    load_sample_ids(BufReader::new(file))
}
