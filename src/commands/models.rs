use crate::notify::MessageKind;
use crate::output::DurationStyle;
use std::path::PathBuf;

/// Arguments for the duration command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct DurationArgs {
    /// Trace file to read
    pub trace_file: PathBuf,

    /// Output path for a JSON report (optional)
    pub output_json: Option<PathBuf>,
}

impl Default for DurationArgs {
    fn default() -> Self {
        Self {
            trace_file: PathBuf::from("trace.txt"),
            output_json: None,
        }
    }
}

/// Arguments for the samples command
#[derive(Debug, Clone)]
pub struct SamplesArgs {
    /// Trace file to read
    pub trace_file: PathBuf,

    /// Sample list with a SAMPLE column
    pub samples_file: PathBuf,

    /// Duration rendering
    pub style: DurationStyle,
}

impl Default for SamplesArgs {
    fn default() -> Self {
        Self {
            trace_file: PathBuf::from("trace.txt"),
            samples_file: PathBuf::from("samples.tsv"),
            style: DurationStyle::Human,
        }
    }
}

/// Arguments for the message command
#[derive(Debug, Clone)]
pub struct MessageArgs {
    /// Event to announce
    pub kind: MessageKind,

    /// Config sidecar path; falls back to CONFIG_JSON
    pub config: Option<PathBuf>,

    /// Trace to summarize in the message (optional)
    pub trace_file: Option<PathBuf>,
}
