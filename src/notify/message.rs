//! Notification message bodies for pipeline start, success and failure.

use super::config::PipelineConfig;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Which pipeline event the message announces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Started,
    Success,
    Failed,
}

impl MessageKind {
    fn headline(self) -> &'static str {
        match self {
            MessageKind::Started => "Pipeline started in directory:",
            MessageKind::Success => "Pipeline finished successfully in directory:",
            MessageKind::Failed => "Pipeline failed in directory:",
        }
    }
}

impl FromStr for MessageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "started" => Ok(MessageKind::Started),
            "success" => Ok(MessageKind::Success),
            "failed" => Ok(MessageKind::Failed),
            other => Err(format!(
                "unknown message type '{}' (expected started, success or failed)",
                other
            )),
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MessageKind::Started => "started",
            MessageKind::Success => "success",
            MessageKind::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// JSON envelope consumed by the mailer
#[derive(Debug, Clone, Serialize)]
pub struct MessageBody {
    pub body: String,
}

fn or_none(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("None")
}

/// Compose the message text
///
/// `durations` is an already rendered duration report; it is appended
/// under an `Execution time:` heading when given.
pub fn compose(kind: MessageKind, config: &PipelineConfig, durations: Option<&str>) -> String {
    let mut sections = vec![format!("{}\n{}", kind.headline(), or_none(&config.pipeline_dir))];

    if kind == MessageKind::Started {
        sections.push(format!("LSF job id: {}", or_none(&config.lsf_jobid)));
    }

    sections.push(format!("log dir:\n{}", or_none(&config.log_dir)));
    sections.push(format!("LSF log:\n{}", or_none(&config.lsf_log)));
    sections.push(format!("Nextflow log:\n{}", or_none(&config.nextflow_log)));

    if let Some(report) = durations {
        sections.push(format!("Execution time:\n{}", report));
    }

    let mut text = sections.join("\n\n");
    text.push('\n');
    text
}

/// Wrap composed text in the `{"body": ...}` envelope
pub fn make_body(kind: MessageKind, config: &PipelineConfig, durations: Option<&str>) -> MessageBody {
    MessageBody {
        body: compose(kind, config, durations),
    }
}
