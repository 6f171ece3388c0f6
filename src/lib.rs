// Export modules for library usage
pub mod aggregation;
pub mod analyzers;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod errors;
pub mod io;
pub mod observability;
pub mod output;

// Re-export commonly used types
pub use crate::core::{
    AnalysisReport, Driver, DriverMeta, FunctionScore, LocationRange, UnitReport,
};

pub use crate::analyzers::{
    scope_reporter::ScopeReporter, select_mode, weights::WeightTable, DetectResult, LangMode,
    Mode, ModeAnalyzer, ModeContext, ReactMode, RegisteredMode,
};

pub use crate::aggregation::{
    apply_threshold, group_functions, rank_units, FilterMetrics, FunctionGroup, GroupOptions,
    Summary, Threshold,
};

pub use crate::config::{AnalysisSettings, FlogConfig};
pub use crate::errors::{FlogError, Result};
