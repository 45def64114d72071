//! Memory size conversion command.
//!
//! Turns values like `4 GB` into byte counts, one per line. Values come
//! from the command line or, when none are given, from stdin.

use crate::parser::parse_size;
use anyhow::{Context, Result};
use log::debug;
use std::io::{self, BufRead};

/// Read one value per line, trimmed, skipping blank lines
pub fn read_values<R: BufRead>(source: R) -> Result<Vec<String>> {
    let mut values = Vec::new();
    for line in source.lines() {
        let line = line.context("Failed to read size values")?;
        let value = line.trim();
        if !value.is_empty() {
            values.push(value.to_string());
        }
    }
    Ok(values)
}

/// Convert every value to bytes, stopping at the first invalid one
pub fn convert_sizes<S: AsRef<str>>(values: &[S]) -> Result<Vec<u64>> {
    values
        .iter()
        .map(|value| parse_size(value.as_ref()).map_err(anyhow::Error::from))
        .collect()
}

/// Execute the mem-convert command
///
/// **Public** - main entry point called from main.rs
pub fn execute_mem_convert(values: Vec<String>) -> Result<()> {
    let values = if values.is_empty() {
        debug!("No values given, reading sizes from stdin");
        read_values(io::stdin().lock())?
    } else {
        values
    };

    for bytes in convert_sizes(&values)? {
        println!("{}", bytes);
    }

    Ok(())
}
