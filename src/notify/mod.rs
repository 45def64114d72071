//! Pipeline notifications.
//!
//! The config sidecar records where a run keeps its logs; messages embed
//! those paths and, once the run is over, its execution time summary.

pub mod config;
pub mod message;

pub use config::{resolve_config_path, PipelineConfig};
pub use message::{compose, make_body, MessageBody, MessageKind};
