//! CLI argument parsing for topomap
//!
//! Global flags: --config, --format, --quiet, --verbose, --log-level, --log-json

pub mod commands;
pub mod format;
pub mod output;
pub mod parse;

use clap::Parser;
use std::path::PathBuf;

pub use commands::Commands;
pub use output::OutputFormat;

/// Topomap - inspect topological navigation maps
#[derive(Parser, Debug)]
#[command(name = "topomap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Map configuration file (defaults to the global config, if present)
    #[arg(long, global = true, env = "TOPOMAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Report timing for major phases
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Log level (error, warn, info, debug, trace) or full filter directives
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
