//! CLI module for flog
//!
//! Argument parsing lives here; runtime setup (thread pool, logging level)
//! lives in `setup`.

pub mod setup;

pub use setup::{configure_thread_pool, get_worker_count, log_level};

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Summary table, or the grouped listing with --group
    Table,
    /// Structured document for tooling
    Json,
    /// Standalone HTML page
    Html,
}

#[derive(Parser, Debug, Default)]
#[command(name = "flog")]
#[command(about = "Heuristic complexity scoring for JavaScript, TypeScript and React", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Files or directories to analyze
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Show every unit and every function (disables the threshold and 60% cutoff)
    #[arg(short = 'a', long)]
    pub all: bool,

    /// Keep going when a file fails to read or parse
    #[arg(short = 'c', long = "continue")]
    pub continue_on_error: bool,

    /// Include per-function scores and drivers
    #[arg(short = 'd', long)]
    pub details: bool,

    /// Group functions by class or component
    #[arg(short = 'g', long)]
    pub group: bool,

    /// Suppress all non-essential output
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Print only the total score
    #[arg(short = 's', long)]
    pub score: bool,

    /// Percentage of units to show (N) or minimum unit score (score:N)
    #[arg(short = 't', long)]
    pub threshold: Option<String>,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Skip code outside of functions and methods
    #[arg(short = 'm', long)]
    pub methods_only: bool,

    /// Include zero-score functions in grouped output
    #[arg(short = 'z', long)]
    pub zero: bool,

    /// Output format (defaults from --output's extension, else table)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write the report to a file instead of stdout
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Worker threads (0 = all cores)
    #[arg(short = 'j', long, default_value_t = 0)]
    pub jobs: usize,

    /// Configuration file (default: nearest .flog.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Parse CLI arguments using Clap
pub fn parse_args() -> Cli {
    Cli::parse()
}
