//! Configuration and constants for the CLI.

/// Current JSON report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Timestamp format used by the workflow runner for human readable traces
/// (e.g. `2020-04-24 21:22:31.512345`)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Field delimiter for trace and sample list files
pub const FIELD_DELIMITER: char = '\t';

// Column names in the trace file header
pub const STATUS_COLUMN: &str = "status";
pub const TAG_COLUMN: &str = "tag";
pub const SUBMIT_COLUMN: &str = "submit";
pub const COMPLETE_COLUMN: &str = "complete";

/// Decimal size units accepted by the memory converter
pub const SIZE_UNITS: &[(&str, u64)] = &[
    ("B", 1),
    ("KB", 1_000),
    ("MB", 1_000_000),
    ("GB", 1_000_000_000),
    ("TB", 1_000_000_000_000),
];

// Column name in the sample list header
pub const SAMPLE_COLUMN: &str = "SAMPLE";

/// Environment variable naming the JSON sidecar config file
pub const CONFIG_JSON_VAR: &str = "CONFIG_JSON";
