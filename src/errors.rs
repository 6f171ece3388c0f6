//! Error types for flog analysis operations.
//!
//! Every unit (one source file) is analyzed in isolation, so an error here
//! describes the failure of a single unit. Whether a batch keeps going after a
//! failed unit is decided by the caller (see `--continue`).
//!
//! # Categories
//!
//! - `Parse`: the syntax-tree producer rejected the source
//! - `Misuse`: a scope was closed that was never opened, or a report was
//!   finalized with scopes still open
//! - `NoModes`: an analyzer was built without any registered mode
//! - `Config`: invalid configuration (file contents or flag values)
//! - `Io`: reading a source file or writing a report failed
//! - `Mode`: an externally supplied mode reported a failure
//!
//! # Example
//!
//! ```rust
//! use flog::errors::FlogError;
//!
//! let err = FlogError::parse_with_location("Unexpected token", "src/app.js", 3, 14);
//! assert!(err.is_parse());
//! assert_eq!(err.to_string(), "Failed to parse src/app.js:3:14: Unexpected token");
//! ```

use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T, E = FlogError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlogError {
    /// Source could not be parsed into a syntax tree
    #[error("Failed to parse {}{}: {message}", .path.display(), location_suffix(.line, .column))]
    Parse {
        message: String,
        path: PathBuf,
        line: Option<usize>,
        column: Option<usize>,
    },

    /// Scope bookkeeping contract violation
    #[error("Scope misuse: {0}")]
    Misuse(String),

    /// No mode is available to analyze a unit
    #[error("No analysis modes registered")]
    NoModes,

    /// Configuration file or option errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system I/O errors
    #[error("I/O error for {}: {message}", .path.display())]
    Io { message: String, path: PathBuf },

    /// Failure reported by a mode implementation
    #[error("Mode '{mode}' failed: {message}")]
    Mode { mode: String, message: String },
}

fn location_suffix(line: &Option<usize>, column: &Option<usize>) -> String {
    match (*line, *column) {
        (Some(line), Some(column)) => format!(":{line}:{column}"),
        (Some(line), None) => format!(":{line}"),
        _ => String::new(),
    }
}

impl FlogError {
    /// Create a parse error with path context (no location).
    pub fn parse(message: impl Into<String>, path: impl AsRef<Path>) -> Self {
        Self::Parse {
            message: message.into(),
            path: path.as_ref().to_path_buf(),
            line: None,
            column: None,
        }
    }

    /// Create a parse error with a 1-based line and column.
    pub fn parse_with_location(
        message: impl Into<String>,
        path: impl AsRef<Path>,
        line: usize,
        column: usize,
    ) -> Self {
        Self::Parse {
            message: message.into(),
            path: path.as_ref().to_path_buf(),
            line: Some(line),
            column: Some(column),
        }
    }

    pub fn misuse(message: impl Into<String>) -> Self {
        Self::Misuse(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn io(message: impl Into<String>, path: impl AsRef<Path>) -> Self {
        Self::Io {
            message: message.into(),
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn mode(mode: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Mode {
            mode: mode.into(),
            message: message.into(),
        }
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    pub fn is_misuse(&self) -> bool {
        matches!(self, Self::Misuse(_))
    }

    /// Short category label used when a failed unit is recorded in a batch.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Parse { .. } => "parse",
            Self::Misuse(_) => "misuse",
            Self::NoModes => "mode-selection",
            Self::Config(_) => "config",
            Self::Io { .. } => "io",
            Self::Mode { .. } => "mode",
        }
    }
}

impl From<toml::de::Error> for FlogError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}
