use crate::errors::{FlogError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Threshold used when neither the CLI nor `.flog.toml` sets one.
pub const DEFAULT_THRESHOLD: &str = "60";

/// Sources matching these globs are skipped unless overridden.
pub fn default_exclude() -> Vec<String> {
    vec!["**/*.test.*".to_string(), "**/*.spec.*".to_string()]
}

/// Root configuration structure loaded from `.flog.toml`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FlogConfig {
    /// Skip code outside any function scope
    #[serde(default)]
    pub methods_only: bool,

    /// Percentage (`"60"`) or absolute minimum (`"score:10"`)
    #[serde(default)]
    pub threshold: Option<String>,

    /// Glob patterns of files to skip
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,

    /// Per-pattern weight overrides
    #[serde(default)]
    pub weights: HashMap<String, f64>,
}

impl Default for FlogConfig {
    fn default() -> Self {
        Self {
            methods_only: false,
            threshold: None,
            exclude: default_exclude(),
            weights: HashMap::new(),
        }
    }
}

impl FlogConfig {
    /// Reject weights that could break score accounting.
    pub fn validate(&self) -> Result<()> {
        let mut invalid: Vec<_> = self
            .weights
            .iter()
            .filter(|(_, w)| !w.is_finite() || **w < 0.0)
            .map(|(k, w)| format!("{k} = {w}"))
            .collect();
        if invalid.is_empty() {
            return Ok(());
        }
        invalid.sort();
        Err(FlogError::config(format!(
            "weights must be finite and non-negative: {}",
            invalid.join(", ")
        )))
    }

    pub fn threshold_or_default(&self) -> &str {
        self.threshold.as_deref().unwrap_or(DEFAULT_THRESHOLD)
    }

    /// The subset of configuration every mode sees.
    pub fn analysis_settings(&self) -> AnalysisSettings {
        AnalysisSettings {
            methods_only: self.methods_only,
            weights: self.weights.clone(),
        }
    }
}

/// Flat options passed to mode construction and analysis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisSettings {
    pub methods_only: bool,
    pub weights: HashMap<String, f64>,
}
