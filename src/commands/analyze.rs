use crate::aggregation::{apply_threshold, keep_all, rank_units, GroupOptions, Summary, Threshold};
use crate::analyzers::ModeAnalyzer;
use crate::cli::{self, Cli, OutputFormat};
use crate::config::{AnalysisSettings, FlogConfig};
use crate::core::UnitReport;
use crate::errors::Result as FlogResult;
use crate::io;
use crate::output::{self, RenderOptions};
use anyhow::{Context, Result};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub struct AnalyzeConfig {
    pub paths: Vec<PathBuf>,
    pub all: bool,
    pub continue_on_error: bool,
    pub details: bool,
    pub group: bool,
    pub quiet: bool,
    pub score: bool,
    pub threshold: Threshold,
    pub show_zero: bool,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
    pub jobs: usize,
    pub exclude: Vec<String>,
    pub settings: AnalysisSettings,
}

impl AnalyzeConfig {
    /// Merge parsed flags over file configuration; flags win.
    pub fn from_cli(cli: &Cli, file: &FlogConfig) -> Result<Self> {
        let threshold_text = cli
            .threshold
            .as_deref()
            .unwrap_or_else(|| file.threshold_or_default());
        let threshold: Threshold = threshold_text.parse()?;

        let mut settings = file.analysis_settings();
        settings.methods_only |= cli.methods_only;

        Ok(Self {
            paths: cli.paths.clone(),
            all: cli.all,
            continue_on_error: cli.continue_on_error,
            details: cli.details,
            group: cli.group,
            quiet: cli.quiet,
            score: cli.score,
            threshold,
            show_zero: cli.zero,
            format: cli.format,
            output: cli.output.clone(),
            jobs: cli.jobs,
            exclude: file.exclude.clone(),
            settings,
        })
    }

    fn render_options(&self) -> RenderOptions {
        RenderOptions {
            details: self.details,
            group: self.group,
            grouping: GroupOptions {
                include_all: self.all,
                show_zero: self.show_zero,
            },
        }
    }
}

/// Scored units of one run, split by outcome.
#[derive(Debug, Default)]
pub struct AnalysisOutcome {
    /// Successfully analyzed units, highest total first
    pub units: Vec<UnitReport>,
    /// Degraded entries for units that failed (only with `--continue`)
    pub failed: Vec<UnitReport>,
}

impl AnalysisOutcome {
    pub fn total_score(&self) -> f64 {
        Summary::from_units(&self.units).total_score
    }
}

/// Read and analyze a single file.
pub fn analyze_file(path: &Path, analyzer: &ModeAnalyzer) -> FlogResult<UnitReport> {
    let content = io::read_source(path)?;
    analyzer.analyze_source(&content, path)
}

/// Analyze `files` on `pool`. Units are independent; results are merged in
/// input order so the first failure reported is deterministic.
pub fn analyze_files(
    files: &[PathBuf],
    analyzer: &ModeAnalyzer,
    continue_on_error: bool,
    pool: &rayon::ThreadPool,
) -> Result<AnalysisOutcome> {
    let results: Vec<FlogResult<UnitReport>> =
        pool.install(|| files.par_iter().map(|f| analyze_file(f, analyzer)).collect());

    let mut outcome = AnalysisOutcome::default();
    for (path, result) in files.iter().zip(results) {
        match result {
            Ok(unit) => outcome.units.push(unit),
            Err(e) if continue_on_error => {
                warn!("Error analyzing {}: {}", path.display(), e);
                outcome.failed.push(UnitReport::failed(path, e.to_string()));
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to analyze {}", path.display()))
            }
        }
    }

    outcome.units = rank_units(outcome.units);
    Ok(outcome)
}

/// Discover and analyze every source file named by `config`.
pub fn analyze_paths(config: &AnalyzeConfig) -> Result<AnalysisOutcome> {
    let files = io::find_source_files(&config.paths, &config.exclude)?;
    info!("Analyzing {} file(s)", files.len());

    let analyzer = ModeAnalyzer::new(config.settings.clone());
    let pool = cli::configure_thread_pool(config.jobs)?;
    analyze_files(&files, &analyzer, config.continue_on_error, &pool)
}

pub fn handle_analyze(config: AnalyzeConfig) -> Result<()> {
    let outcome = analyze_paths(&config)?;

    if outcome.units.is_empty() && outcome.failed.is_empty() {
        if !config.quiet {
            println!("No files found to analyze");
        }
        return Ok(());
    }

    if config.score {
        if !config.quiet {
            println!("Total flog score: {:.2}", outcome.total_score());
        }
        return Ok(());
    }

    let failed = outcome.failed.len();
    let filtered = if config.all {
        keep_all(outcome.units)
    } else {
        apply_threshold(outcome.units, config.threshold)
    };

    let format = output::resolve_format(config.format, config.output.as_deref());
    if config.output.is_some() || !config.quiet {
        let content = output::render(&filtered.included, format, config.render_options())?;
        output::emit(&content, config.output.as_deref())?;
        if let Some(path) = config.output.as_deref().filter(|_| !config.quiet) {
            println!("Report saved to: {}", path.display());
        }
    }

    if failed > 0 && !config.quiet {
        eprintln!("\nErrors: {failed} file(s) failed to parse");
    }
    Ok(())
}
