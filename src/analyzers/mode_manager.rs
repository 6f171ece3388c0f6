//! Registry of scoring modes and the per-unit detect → select → analyze flow.

use super::scope_reporter::ScopeReporter;
use super::weights::WeightTable;
use super::{select_mode, DetectResult, LangMode, Mode, ModeContext, ReactMode, RegisteredMode};
use crate::config::AnalysisSettings;
use crate::core::ast::SyntaxTree;
use crate::core::parsing::parse_source;
use crate::core::{AnalysisReport, UnitReport};
use crate::errors::{FlogError, Result};
use std::path::Path;
use tracing::{debug, info_span, warn};

/// Runs every registered mode's detector on a unit and analyzes it with
/// the winner.
#[derive(Debug)]
pub struct ModeAnalyzer {
    modes: Vec<RegisteredMode>,
    settings: AnalysisSettings,
}

impl ModeAnalyzer {
    /// The built-in modes (`lang`, then `react`) with configured weight
    /// overrides applied.
    pub fn new(settings: AnalysisSettings) -> Self {
        let lang = WeightTable::lang().with_overrides(&settings.weights);
        let react = WeightTable::react().with_overrides(&settings.weights);

        for key in settings.weights.keys() {
            if !lang.knows(key) && !react.knows(key) {
                warn!("Ignoring weight override for unknown pattern '{}'", key);
            }
        }

        Self {
            modes: vec![
                RegisteredMode::Lang(LangMode::new(lang)),
                RegisteredMode::React(ReactMode::new(react)),
            ],
            settings,
        }
    }

    /// Analyzer over an explicit list of modes, in registration order.
    pub fn from_modes(settings: AnalysisSettings, modes: Vec<Box<dyn Mode>>) -> Result<Self> {
        if modes.is_empty() {
            return Err(FlogError::NoModes);
        }
        Ok(Self {
            modes: modes.into_iter().map(RegisteredMode::from).collect(),
            settings,
        })
    }

    /// Register another mode after the existing ones.
    pub fn with_mode(mut self, mode: Box<dyn Mode>) -> Self {
        self.modes.push(mode.into());
        self
    }

    pub fn modes(&self) -> &[RegisteredMode] {
        &self.modes
    }

    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    /// Detection results in registration order.
    pub fn detect_all(&self, ctx: &ModeContext<'_>) -> Result<Vec<DetectResult>> {
        self.modes.iter().map(|mode| mode.detect(ctx)).collect()
    }

    /// Winning mode for a unit together with every detection result.
    pub fn detect_best(&self, ctx: &ModeContext<'_>) -> Result<(&RegisteredMode, Vec<DetectResult>)> {
        let results = self.detect_all(ctx)?;
        let winner = select_mode(&results).ok_or(FlogError::NoModes)?;
        Ok((&self.modes[winner], results))
    }

    /// Analyze a unit with a specific mode and a fresh reporter.
    pub fn analyze_with(&self, mode: &dyn Mode, ctx: &ModeContext<'_>) -> Result<AnalysisReport> {
        let reporter = ScopeReporter::methods_only(self.settings.methods_only);
        mode.analyze(ctx, reporter)
            .map_err(|e| match e {
                FlogError::Misuse(message) => FlogError::mode(mode.id(), message),
                other => other,
            })
    }

    /// Detect, select and analyze an already parsed unit.
    pub fn analyze_tree(&self, tree: &SyntaxTree) -> Result<UnitReport> {
        let ctx = ModeContext::new(tree);
        let (mode, results) = self.detect_best(&ctx)?;
        debug!(
            "Selected mode '{}' for {} ({:?})",
            mode.id(),
            tree.path.display(),
            results
                .iter()
                .map(|r| (r.mode_id.as_str(), r.confidence))
                .collect::<Vec<_>>()
        );

        let report = self.analyze_with(mode, &ctx)?;
        Ok(UnitReport::new(&tree.path, mode.id(), report))
    }

    /// Parse, detect, select and analyze one source unit.
    pub fn analyze_source(&self, content: &str, path: &Path) -> Result<UnitReport> {
        let span = info_span!("unit", path = %path.display());
        let _enter = span.enter();

        let tree = parse_source(content, path)?;
        let unit = self.analyze_tree(&tree)?;
        debug!(
            "Scored {} at {:.2} across {} function(s)",
            path.display(),
            unit.total(),
            unit.report.functions.len()
        );
        Ok(unit)
    }
}

impl Default for ModeAnalyzer {
    fn default() -> Self {
        Self::new(AnalysisSettings::default())
    }
}
