//! Config and message command implementations.
//!
//! `config` snapshots the pipeline environment into the JSON sidecar;
//! `message` reads it back and prints a notification body.

use super::duration::calculate_trace_duration;
use super::models::MessageArgs;
use crate::notify::{make_body, resolve_config_path, MessageKind, PipelineConfig};
use anyhow::{Context, Result};
use log::{info, warn};
use std::path::Path;

/// Write the config sidecar from the current environment
///
/// **Public** - main entry point called from main.rs
pub fn execute_config(config_path: Option<&Path>) -> Result<()> {
    let path = resolve_config_path(config_path)?;
    let config = PipelineConfig::from_env();

    config
        .write(&path)
        .with_context(|| format!("Failed to write config {}", path.display()))?;

    info!("✓ Config written to: {}", path.display());
    Ok(())
}

/// Build the JSON notification body
///
/// **Public** - returns the serialized `{"body": ...}` document
///
/// The trace summary is only attached to success and failure messages;
/// an unreadable trace is logged and left out rather than failing the
/// notification.
pub fn build_message(args: &MessageArgs) -> Result<String> {
    let path = resolve_config_path(args.config.as_deref())?;
    let config = PipelineConfig::read(&path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;

    let durations = match (&args.trace_file, args.kind) {
        (Some(trace), MessageKind::Success | MessageKind::Failed) => {
            match calculate_trace_duration(trace) {
                Ok((_, message)) => Some(message),
                Err(e) => {
                    warn!("Skipping execution time summary: {:#}", e);
                    None
                }
            }
        }
        _ => None,
    };

    let body = make_body(args.kind, &config, durations.as_deref());
    Ok(serde_json::to_string_pretty(&body)?)
}

/// Execute the message command
///
/// **Public** - main entry point called from main.rs
pub fn execute_message(args: MessageArgs) -> Result<()> {
    info!("Composing '{}' message", args.kind);
    println!("{}", build_message(&args)?);
    Ok(())
}
