use anyhow::Result;
use std::path::Path;
use crate::utils::config::SCHEMA_VERSION;

/// Check that an input file exists before any work starts
///
/// `what` names the file in the error message (e.g. "Trace file").
pub fn validate_input_file(path: &Path, what: &str) -> Result<()> {
    if path.as_os_str().is_empty() {
        anyhow::bail!("{} path cannot be empty", what);
    }

    if !path.exists() {
        anyhow::bail!("{} not found: {}", what, path.display());
    }

    if path.is_dir() {
        anyhow::bail!("{} is a directory: {}", what, path.display());
    }

    Ok(())
}

/// Display version information
pub fn display_version() {
    println!("Trace Tempo v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Wall-clock execution time from workflow runner traces.");
}
