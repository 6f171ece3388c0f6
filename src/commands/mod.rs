//! CLI command implementations.
//!
//! flog has a single command: analyze the given paths and report.

pub mod analyze;

pub use analyze::{analyze_paths, handle_analyze, AnalysisOutcome, AnalyzeConfig};

use crate::cli::Cli;
use crate::config::{load_config, load_config_from, FlogConfig};
use anyhow::{Context, Result};

/// Configuration named by `--config`, else the nearest `.flog.toml`.
pub fn resolve_config(cli: &Cli) -> Result<FlogConfig> {
    match &cli.config {
        Some(path) => load_config_from(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(load_config()?),
    }
}

/// Entry point used by the binary.
pub fn run(cli: Cli) -> Result<()> {
    let file_config = resolve_config(&cli)?;
    let config = AnalyzeConfig::from_cli(&cli, &file_config)?;
    handle_analyze(config)
}
