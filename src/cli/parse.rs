//! CLI parse: clap types for Noticeboard. No behavior; definitions only.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Noticeboard CLI - exercise the notification queue on a virtual clock
#[derive(Parser)]
#[command(name = "noticeboard")]
#[command(about = "Non-blocking notification and dialog queue with adaptive display durations")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (layered over defaults and the user config)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay a burst of notifications and print the resulting timeline
    Simulate {
        /// Toast to enqueue, as KIND:TITLE (repeatable). Defaults to one of each kind.
        #[arg(long = "toast", value_name = "KIND:TITLE")]
        toasts: Vec<String>,

        /// Also open a confirm dialog with this message
        #[arg(long)]
        confirm: Option<String>,

        /// How the simulated user answers the confirm dialog
        #[arg(long, value_enum, default_value = "confirm")]
        answer: Answer,

        /// Virtual time at which the user answers (milliseconds)
        #[arg(long, default_value_t = 1000)]
        answer_after_ms: u64,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the effective configuration as TOML
    Config,
}

/// Simulated user response to a dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Answer {
    Confirm,
    Cancel,
    Close,
}
