//! Scope tracking for weighted scoring.
//!
//! Scorers walk a syntax tree and call [`ScopeReporter::add`] for every
//! weighted construct they recognise. The reporter attributes each event to
//! the innermost open function scope and keeps a unit-wide total.
//!
//! Nested scopes are isolated: a child's weight is never rolled up into its
//! parent, and a child scope is finalized before its parent.
//!
//! Class/component grouping uses a single "current group" slot rather than a
//! stack. Entering a nested class overwrites the slot and leaving it clears
//! the slot entirely, so functions following a nested class inside an outer
//! class are no longer grouped.

use crate::core::{
    AnalysisReport, Driver, DriverMeta, FunctionScore, LocationRange, TOP_DRIVER_COUNT,
};
use crate::errors::{FlogError, Result};

/// Placeholder name for scopes without an identifier or member key.
pub const ANONYMOUS: &str = "<anonymous>";

/// In-progress accumulator for one open function-like construct.
#[derive(Debug, Clone)]
struct ScopeFrame {
    name: String,
    location: LocationRange,
    score: f64,
    drivers: Vec<Driver>,
    group: Option<String>,
}

/// Stack-based accumulator producing an [`AnalysisReport`] for one unit.
#[derive(Debug, Clone, Default)]
pub struct ScopeReporter {
    /// Open scopes, innermost last
    stack: Vec<ScopeFrame>,

    /// Finalized scopes in exit order
    functions: Vec<FunctionScore>,

    /// Unit-wide running total
    total: f64,

    /// Ignore everything recorded outside of a function scope
    methods_only: bool,

    /// Innermost class/component name
    current_group: Option<String>,
}

impl ScopeReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reporter that drops top-level contributions entirely.
    pub fn methods_only(methods_only: bool) -> Self {
        Self {
            methods_only,
            ..Self::default()
        }
    }

    /// Record a weighted event.
    ///
    /// With `methods_only` set and no open scope, the event is discarded.
    /// Otherwise the unit total always grows; an open scope additionally gets
    /// the weight and a driver.
    pub fn add(&mut self, weight: f64, meta: impl Into<DriverMeta>) {
        debug_assert!(weight >= 0.0, "driver weights are non-negative");
        if self.methods_only && self.stack.is_empty() {
            return;
        }

        self.total += weight;
        if let Some(top) = self.stack.last_mut() {
            top.score += weight;
            top.drivers.push(meta.into().into_driver(weight));
        }
    }

    /// Open a function scope. Without an explicit group the current
    /// class/component name is inherited.
    pub fn enter_function(
        &mut self,
        name: impl Into<String>,
        location: LocationRange,
        group: Option<String>,
    ) {
        self.stack.push(ScopeFrame {
            name: name.into(),
            location,
            score: 0.0,
            drivers: Vec::new(),
            group: group.or_else(|| self.current_group.clone()),
        });
    }

    /// Close the innermost function scope and finalize it.
    pub fn exit_function(&mut self) -> Result<()> {
        let frame = self
            .stack
            .pop()
            .ok_or_else(|| FlogError::misuse("exit_function called with no open scope"))?;

        let mut drivers = frame.drivers;
        // stable: equal weights keep insertion order
        drivers.sort_by(|a, b| b.weight.total_cmp(&a.weight));
        let top_drivers = drivers.iter().take(TOP_DRIVER_COUNT).cloned().collect();

        self.functions.push(FunctionScore {
            name: frame.name,
            score: frame.score,
            location: frame.location,
            top_drivers,
            all_drivers: drivers,
            group: frame.group,
        });
        Ok(())
    }

    pub fn enter_class(&mut self, name: impl Into<String>) {
        self.current_group = Some(name.into());
    }

    pub fn exit_class(&mut self) {
        self.current_group = None;
    }

    pub fn current_group(&self) -> Option<&str> {
        self.current_group.as_deref()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    /// Produce the unit report. Fails if scopes are still open.
    pub fn finalize(self) -> Result<AnalysisReport> {
        if let Some(open) = self.stack.last() {
            return Err(FlogError::misuse(format!(
                "finalize called with {} open scope(s), innermost '{}'",
                self.stack.len(),
                open.name
            )));
        }
        Ok(AnalysisReport {
            total: self.total,
            functions: self.functions,
        })
    }
}
