//! Cross-unit post-processing: ranking, thresholds, grouping and summary
//! figures. Everything here runs after all units have been analyzed.

pub mod filtering;
pub mod grouping;

pub use filtering::{
    apply_threshold, keep_all, percent_cutoff, rank_units, FilterMetrics, FilterResult, Threshold,
};
pub use grouping::{group_functions, FunctionGroup, GroupOptions};

use crate::core::UnitReport;

/// Headline figures over a set of units.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Summary {
    pub total_units: usize,
    pub total_score: f64,
    pub function_count: usize,
}

impl Summary {
    pub fn from_units(units: &[UnitReport]) -> Self {
        Self {
            total_units: units.len(),
            total_score: units.iter().map(UnitReport::total).sum(),
            function_count: units.iter().map(|u| u.report.functions.len()).sum(),
        }
    }

    /// Average total per unit, 0 for an empty set.
    pub fn average_per_unit(&self) -> f64 {
        if self.total_units == 0 {
            0.0
        } else {
            self.total_score / self.total_units as f64
        }
    }

    /// Total score spread over every function, 0 without functions.
    pub fn average_per_function(&self) -> f64 {
        if self.function_count == 0 {
            0.0
        } else {
            self.total_score / self.function_count as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AnalysisReport, FunctionScore, LocationRange};

    fn unit(total: f64, functions: usize) -> UnitReport {
        let functions = (0..functions)
            .map(|i| FunctionScore {
                name: format!("f{i}"),
                score: 0.0,
                location: LocationRange::new(1, 1),
                top_drivers: vec![],
                all_drivers: vec![],
                group: None,
            })
            .collect();
        UnitReport::new("a.js", "lang", AnalysisReport { total, functions })
    }

    #[test]
    fn test_summary_averages() {
        let summary = Summary::from_units(&[unit(6.0, 2), unit(2.0, 2)]);
        assert_eq!(summary.total_score, 8.0);
        assert_eq!(summary.average_per_unit(), 4.0);
        assert_eq!(summary.average_per_function(), 2.0);
    }

    #[test]
    fn test_empty_summary() {
        let summary = Summary::from_units(&[]);
        assert_eq!(summary.average_per_unit(), 0.0);
        assert_eq!(summary.average_per_function(), 0.0);
    }
}
