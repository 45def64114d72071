//! Human readable memory sizes from the trace (`peak_rss`, `vmem`, ...).
//!
//! Values look like `4 GB`, `1MB` or `10.5 KB`. Units are decimal.

use crate::utils::config::SIZE_UNITS;
use crate::utils::error::ParseError;

/// Convert a human readable size into whole bytes
///
/// **Public** - used by the `mem-convert` command
///
/// The unit is case-insensitive and may or may not be separated from the
/// number by whitespace. Fractional byte counts are truncated.
///
/// # Errors
/// * `ParseError::InvalidSize` - missing or unknown unit, or a number that
///   is not a finite, non-negative value
///
/// # Example
/// ```ignore
/// assert_eq!(parse_size("4 GB")?, 4_000_000_000);
/// ```
pub fn parse_size(value: &str) -> Result<u64, ParseError> {
    let invalid = || ParseError::InvalidSize(value.to_string());

    let upper = value.trim().to_ascii_uppercase();
    let unit_start = upper
        .rfind(|c: char| !c.is_ascii_alphabetic())
        .map(|index| index + 1)
        .unwrap_or(0);
    let (number, unit) = upper.split_at(unit_start);

    let multiplier = SIZE_UNITS
        .iter()
        .find(|(name, _)| *name == unit)
        .map(|(_, multiplier)| *multiplier)
        .ok_or_else(invalid)?;

    let number: f64 = number.trim().parse().map_err(|_| invalid())?;
    if !number.is_finite() || number < 0.0 {
        return Err(invalid());
    }

    let bytes = number * multiplier as f64;
    if bytes > u64::MAX as f64 {
        return Err(invalid());
    }

    Ok(bytes as u64)
}
