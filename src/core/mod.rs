pub mod ast;
pub mod parsing;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Number of drivers kept in [`FunctionScore::top_drivers`].
pub const TOP_DRIVER_COUNT: usize = 5;

/// Inclusive 1-based line range of a scope.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationRange {
    pub start: usize,
    pub end: usize,
}

impl LocationRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// One attributed scoring event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub kind: String,
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Everything about a driver except its weight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DriverMeta {
    pub kind: String,
    pub message: Option<String>,
}

impl DriverMeta {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn into_driver(self, weight: f64) -> Driver {
        Driver {
            kind: self.kind,
            weight,
            message: self.message,
        }
    }
}

impl From<&str> for DriverMeta {
    fn from(kind: &str) -> Self {
        Self::new(kind)
    }
}

impl From<String> for DriverMeta {
    fn from(kind: String) -> Self {
        Self::new(kind)
    }
}

/// Finalized score of one function-like scope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FunctionScore {
    pub name: String,
    pub score: f64,
    pub location: LocationRange,
    /// Highest-weighted drivers, a prefix of `all_drivers`
    pub top_drivers: Vec<Driver>,
    /// All drivers sorted by descending weight (stable)
    pub all_drivers: Vec<Driver>,
    /// Class or component the function is grouped under
    pub group: Option<String>,
}

/// Result of scoring one source unit.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub total: f64,
    /// Functions in scope-exit order (inner before outer)
    pub functions: Vec<FunctionScore>,
}

impl AnalysisReport {
    pub fn function(&self, name: &str) -> Option<&FunctionScore> {
        self.functions.iter().find(|f| f.name == name)
    }
}

/// A scored source unit as handed to aggregation and rendering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UnitReport {
    pub path: PathBuf,
    pub mode: String,
    pub report: AnalysisReport,
    /// Set when the unit failed and was kept as a degraded entry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UnitReport {
    pub const ERROR_MODE: &'static str = "error";

    pub fn new(path: impl Into<PathBuf>, mode: impl Into<String>, report: AnalysisReport) -> Self {
        Self {
            path: path.into(),
            mode: mode.into(),
            report,
            error: None,
        }
    }

    /// Zero-score placeholder for a unit whose pipeline failed.
    pub fn failed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mode: Self::ERROR_MODE.to_string(),
            report: AnalysisReport::default(),
            error: Some(message.into()),
        }
    }

    pub fn total(&self) -> f64 {
        self.report.total
    }

    pub fn is_failed(&self) -> bool {
        self.error.is_some()
    }
}
