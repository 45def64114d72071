//! Pipeline config sidecar.
//!
//! The pipeline wrapper records its environment into a JSON file so that
//! later steps (notifications, reports) can find the run's logs and inputs.

use crate::output::write_json;
use crate::utils::config::CONFIG_JSON_VAR;
use crate::utils::error::ConfigError;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Values recorded for one pipeline run
///
/// Every field is optional; unset environment variables stay `None`
/// and serialize as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub log_dir: Option<String>,
    #[serde(default)]
    pub nextflow_log: Option<String>,
    #[serde(default)]
    pub mapping_tsv: Option<String>,
    #[serde(default)]
    pub pairing_tsv: Option<String>,
    #[serde(default)]
    pub output_dir: Option<String>,
    #[serde(default)]
    pub pipeline_dir: Option<String>,
    #[serde(default)]
    pub lsf_log: Option<String>,
    #[serde(default)]
    pub lsf_jobid: Option<String>,
}

impl PipelineConfig {
    /// Build from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            timestamp: lookup("TIMESTAMP"),
            log_dir: lookup("LOG_DIR"),
            nextflow_log: lookup("NXF_LOG"),
            mapping_tsv: lookup("MAPPING_TSV"),
            pairing_tsv: lookup("PAIRING_TSV"),
            output_dir: lookup("OUTPUT_DIR"),
            pipeline_dir: lookup("PIPELINE_DIR"),
            lsf_log: lookup("LSF_LOG"),
            lsf_jobid: lookup("LSF_JOBID"),
        }
    }

    /// Write the sidecar as pretty JSON
    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        write_json(self, path)?;
        info!("Config written to: {}", path.display());
        Ok(())
    }

    /// Load a sidecar written by [`PipelineConfig::write`]
    pub fn read(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("Reading config from: {}", path.display());
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

/// Resolve the sidecar path: explicit path first, then `CONFIG_JSON`
///
/// # Errors
/// * `ConfigError::MissingVar` - no explicit path and `CONFIG_JSON` unset
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    std::env::var_os(CONFIG_JSON_VAR)
        .map(PathBuf::from)
        .ok_or_else(|| ConfigError::MissingVar(CONFIG_JSON_VAR.to_string()))
}
