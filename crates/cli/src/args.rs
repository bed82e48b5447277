//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::Level;

#[derive(Debug, Parser)]
#[command(
    name = "openrpc-release",
    version,
    about = "Keep an OpenRPC document's info.version in step with a release"
)]
pub struct Cli {
    /// Log line format on stderr.
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true, env = "OPENRPC_RELEASE_LOG_FORMAT")]
    pub log_format: LogFormat,

    /// Default verbosity when RUST_LOG is not set.
    #[arg(long, default_value_t = Level::WARN, global = true)]
    pub log_level: Level,

    /// Abort any single file operation that takes longer than this.
    #[arg(long, global = true, value_name = "MILLISECONDS")]
    pub io_timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Pre-flight: fail unless the document exists and is readable.
    VerifyConditions(StepArgs),

    /// Write the next release version into the document.
    Prepare {
        #[command(flatten)]
        step: StepArgs,

        /// Resolved version; overrides nextRelease.version from --context.
        #[arg(long)]
        next_version: Option<String>,
    },
}

impl Command {
    pub fn step(&self) -> &StepArgs {
        match self {
            Command::VerifyConditions(step) | Command::Prepare { step, .. } => step,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::VerifyConditions(_) => "verify_conditions",
            Command::Prepare { .. } => "prepare",
        }
    }
}

/// Inputs shared by both steps. Flags override values loaded from files.
#[derive(Debug, Args)]
pub struct StepArgs {
    /// JSON plugin configuration (`{"documentLocation": ...}`).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the OpenRPC document, relative to the working directory.
    #[arg(long)]
    pub document_location: Option<String>,

    /// Subdirectory probed when the document is not at its configured location.
    #[arg(long, conflicts_with = "no_fallback")]
    pub fallback_directory: Option<String>,

    /// Only look at the configured location.
    #[arg(long)]
    pub no_fallback: bool,

    /// JSON release context (`{"cwd": ..., "nextRelease": {"version": ...}}`).
    #[arg(long, value_name = "FILE")]
    pub context: Option<PathBuf>,

    /// Working directory for relative locations; defaults to the current one.
    #[arg(long)]
    pub cwd: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}
