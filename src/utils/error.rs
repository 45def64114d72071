//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while reading trace and sample list files
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing required column: {column}")]
    MissingColumn { column: String },

    #[error("Input has no header row")]
    EmptyInput,

    #[error("Invalid size value: {0}")]
    InvalidSize(String),
}

/// Errors that can occur while building or loading the pipeline config sidecar
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Required environment variable not set: {0}")]
    MissingVar(String),

    #[error("Config file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write config: {0}")]
    Output(#[from] OutputError),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
