use crate::core::ast::SyntaxTree;
use crate::core::AnalysisReport;
use crate::errors::Result;
use scope_reporter::ScopeReporter;
use serde::Serialize;
use std::fmt;
use std::path::Path;

pub mod javascript;
pub mod mode_manager;
pub mod scope_reporter;
pub mod weights;

pub use javascript::{LangMode, ReactMode};
pub use mode_manager::ModeAnalyzer;

/// How strongly a mode claims a unit.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DetectResult {
    pub mode_id: String,
    /// In `[0, 1]`
    pub confidence: f64,
    pub reasons: Vec<String>,
    /// Wins selection regardless of confidence
    pub force: bool,
}

impl DetectResult {
    pub fn new(mode_id: impl Into<String>, confidence: f64) -> Self {
        Self {
            mode_id: mode_id.into(),
            confidence,
            reasons: Vec::new(),
            force: false,
        }
    }

    /// Full-confidence claim that overrides every other detector.
    pub fn forced(mode_id: impl Into<String>) -> Self {
        Self {
            force: true,
            ..Self::new(mode_id, 1.0)
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reasons.push(reason.into());
        self
    }

    pub fn with_reasons(mut self, reasons: impl IntoIterator<Item = String>) -> Self {
        self.reasons.extend(reasons);
        self
    }
}

/// Everything a mode sees about the unit being analyzed.
pub struct ModeContext<'a> {
    pub path: &'a Path,
    pub source: &'a str,
    pub tree: &'a SyntaxTree,
    /// Lowercased extension including the dot (`.tsx`), empty when absent
    pub extension: String,
}

impl<'a> ModeContext<'a> {
    pub fn new(tree: &'a SyntaxTree) -> Self {
        Self {
            path: &tree.path,
            source: &tree.source,
            tree,
            extension: extension_of(&tree.path),
        }
    }
}

/// A pluggable scoring strategy: a detector plus an analyzer.
pub trait Mode: Send + Sync {
    fn id(&self) -> &str;
    fn detect(&self, ctx: &ModeContext<'_>) -> Result<DetectResult>;
    fn analyze(&self, ctx: &ModeContext<'_>, reporter: ScopeReporter) -> Result<AnalysisReport>;
}

/// Modes known to the analyzer. Built-ins are stored by value; anything
/// else is boxed.
pub enum RegisteredMode {
    Lang(LangMode),
    React(ReactMode),
    External(Box<dyn Mode>),
}

impl RegisteredMode {
    fn as_mode(&self) -> &dyn Mode {
        match self {
            RegisteredMode::Lang(mode) => mode,
            RegisteredMode::React(mode) => mode,
            RegisteredMode::External(mode) => mode.as_ref(),
        }
    }
}

impl Mode for RegisteredMode {
    fn id(&self) -> &str {
        self.as_mode().id()
    }

    fn detect(&self, ctx: &ModeContext<'_>) -> Result<DetectResult> {
        self.as_mode().detect(ctx)
    }

    fn analyze(&self, ctx: &ModeContext<'_>, reporter: ScopeReporter) -> Result<AnalysisReport> {
        self.as_mode().analyze(ctx, reporter)
    }
}

impl fmt::Debug for RegisteredMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RegisteredMode").field(&self.id()).finish()
    }
}

impl From<Box<dyn Mode>> for RegisteredMode {
    fn from(mode: Box<dyn Mode>) -> Self {
        RegisteredMode::External(mode)
    }
}

/// Index of the winning detection.
///
/// The first forced result wins outright. Otherwise the highest confidence
/// wins and ties go to the earliest registered mode. Non-finite confidences
/// count as zero.
pub fn select_mode(results: &[DetectResult]) -> Option<usize> {
    if let Some(forced) = results.iter().position(|r| r.force) {
        return Some(forced);
    }

    let confidence = |r: &DetectResult| {
        if r.confidence.is_finite() {
            r.confidence
        } else {
            0.0
        }
    };
    let mut best: Option<usize> = None;
    for (idx, result) in results.iter().enumerate() {
        match best {
            Some(b) if confidence(&results[b]) >= confidence(result) => {}
            _ => best = Some(idx),
        }
    }
    best
}

/// `.tsx` style extension of a path.
pub fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default()
}
