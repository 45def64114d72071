//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod duration;
pub mod mem;
pub mod models;
pub mod notify;
pub mod samples;
pub mod utils;

// Re-export main command functions
pub use duration::{calculate_trace_duration, execute_duration};
pub use mem::{convert_sizes, execute_mem_convert, read_values};
pub use models::{DurationArgs, MessageArgs, SamplesArgs};
pub use notify::{build_message, execute_config, execute_message};
pub use samples::{calculate_sample_durations, execute_samples};
pub use utils::{display_version, validate_input_file};
