//! Re-bucketing of a unit's functions by class/component name.

use crate::core::{FunctionScore, UnitReport};

/// Share of each bucket's functions kept unless everything is requested.
const GROUP_CUTOFF_PCT: f64 = 60.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GroupOptions {
    /// Keep every function instead of the top 60%
    pub include_all: bool,
    /// Keep zero-score functions
    pub show_zero: bool,
}

/// Functions of one unit sharing a group name.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionGroup {
    /// `None` for functions outside any class or component
    pub name: Option<String>,
    /// Sum of the retained functions' scores
    pub total: f64,
    /// Retained functions, highest score first
    pub functions: Vec<FunctionScore>,
}

impl FunctionGroup {
    /// Label shown for the bucket; ungrouped functions use the file stem.
    pub fn display_name(&self, unit: &UnitReport) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => unit
                .path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
        }
    }

    /// `Class#method` for grouped functions, the bare name otherwise.
    pub fn qualified_name(&self, function: &FunctionScore) -> String {
        match &self.name {
            Some(group) => format!("{group}#{}", function.name),
            None => function.name.clone(),
        }
    }
}

/// Bucket a unit's functions by group.
///
/// Within each bucket functions are sorted by descending score, zero-score
/// functions are dropped unless `show_zero`, and only the top
/// `ceil(n × 0.6)` are kept unless `include_all`. Buckets left empty are
/// omitted. Buckets are returned by descending total, ties in first-seen
/// order.
pub fn group_functions(unit: &UnitReport, options: GroupOptions) -> Vec<FunctionGroup> {
    let mut buckets: Vec<(Option<String>, Vec<FunctionScore>)> = Vec::new();
    for function in &unit.report.functions {
        match buckets.iter_mut().find(|(name, _)| *name == function.group) {
            Some((_, functions)) => functions.push(function.clone()),
            None => buckets.push((function.group.clone(), vec![function.clone()])),
        }
    }

    let mut groups: Vec<FunctionGroup> = buckets
        .into_iter()
        .filter_map(|(name, functions)| {
            let functions = select_functions(functions, options);
            if functions.is_empty() {
                return None;
            }
            let total = functions.iter().map(|f| f.score).sum();
            Some(FunctionGroup {
                name,
                total,
                functions,
            })
        })
        .collect();

    groups.sort_by(|a, b| b.total.total_cmp(&a.total));
    groups
}

fn select_functions(mut functions: Vec<FunctionScore>, options: GroupOptions) -> Vec<FunctionScore> {
    functions.sort_by(|a, b| b.score.total_cmp(&a.score));
    if !options.show_zero {
        functions.retain(|f| f.score != 0.0);
    }
    if !options.include_all {
        let cutoff = super::filtering::percent_cutoff(functions.len(), GROUP_CUTOFF_PCT);
        functions.truncate(cutoff);
    }
    functions
}
