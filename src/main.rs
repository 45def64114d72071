//! Trace Tempo CLI
//!
//! Reports how much wall-clock time a workflow run spent executing tasks,
//! with overlapping and retried tasks counted once.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use trace_tempo::commands::{
    display_version, execute_config, execute_duration, execute_mem_convert, execute_message,
    execute_samples,
    validate_input_file, DurationArgs, MessageArgs, SamplesArgs,
};
use trace_tempo::notify::MessageKind;
use trace_tempo::output::DurationStyle;

/// Trace Tempo - execution time from workflow traces
#[derive(Parser, Debug)]
#[command(name = "tempo")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Total execution time per task status
    Duration {
        /// Trace file (tab-delimited, human readable timestamps)
        #[arg(env = "TRACE_FILE")]
        trace: PathBuf,

        /// Also write a JSON report to this path
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Execution time per sample, longest first
    Samples {
        /// Trace file (tab-delimited, human readable timestamps)
        #[arg(env = "TRACE_FILE")]
        trace: PathBuf,

        /// Sample list with a SAMPLE column
        #[arg(short, long, env = "SAMPLES_TSV")]
        samples: PathBuf,

        /// Print durations as raw seconds
        #[arg(long)]
        seconds: bool,
    },

    /// Save pipeline environment variables to the JSON config sidecar
    Config {
        /// Sidecar path (defaults to $CONFIG_JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print a notification body as JSON
    Message {
        /// Message type: started, success or failed
        kind: MessageKind,

        /// Sidecar path (defaults to $CONFIG_JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Trace file to summarize in success/failure messages
        #[arg(short, long)]
        trace: Option<PathBuf>,
    },

    /// Convert memory sizes such as `4 GB` to bytes
    MemConvert {
        /// Values to convert (read from stdin, one per line, when omitted)
        values: Vec<String>,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Duration { trace, json } => {
            validate_input_file(&trace, "Trace file")?;

            execute_duration(DurationArgs {
                trace_file: trace,
                output_json: json,
            })?;
        }

        Commands::Samples {
            trace,
            samples,
            seconds,
        } => {
            // The sample list is checked first; without it nothing can be computed
            validate_input_file(&samples, "Sample list")?;
            validate_input_file(&trace, "Trace file")?;

            let style = if seconds {
                DurationStyle::Seconds
            } else {
                DurationStyle::Human
            };

            execute_samples(SamplesArgs {
                trace_file: trace,
                samples_file: samples,
                style,
            })?;
        }

        Commands::Config { config } => {
            execute_config(config.as_deref())?;
        }

        Commands::Message {
            kind,
            config,
            trace,
        } => {
            execute_message(MessageArgs {
                kind,
                config,
                trace_file: trace,
            })?;
        }

        Commands::MemConvert { values } => {
            execute_mem_convert(values)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
