//! Unit ranking and threshold filtering with metrics about what was dropped.

use crate::core::UnitReport;
use crate::errors::{FlogError, Result};
use std::fmt;
use std::str::FromStr;

const MIN_SCORE_PREFIX: &str = "score:";

/// Cutoff applied to ranked units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Threshold {
    /// Keep the top `ceil(N × pct / 100)` units
    Percent(f64),
    /// Keep units whose total is at least this score
    MinScore(f64),
}

impl FromStr for Threshold {
    type Err = FlogError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let (value, build): (&str, fn(f64) -> Threshold) = match s.strip_prefix(MIN_SCORE_PREFIX) {
            Some(score) => (score, Threshold::MinScore),
            None => (s, Threshold::Percent),
        };
        let parsed: f64 = value
            .trim()
            .parse()
            .map_err(|_| FlogError::config(format!("Invalid threshold '{s}'")))?;
        if !parsed.is_finite() || parsed < 0.0 {
            return Err(FlogError::config(format!(
                "Threshold must be a non-negative number, got '{s}'"
            )));
        }
        Ok(build(parsed))
    }
}

impl fmt::Display for Threshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Threshold::Percent(pct) => write!(f, "{pct}%"),
            Threshold::MinScore(score) => write!(f, "{MIN_SCORE_PREFIX}{score}"),
        }
    }
}

/// What threshold filtering removed.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterMetrics {
    /// Units before filtering
    pub total_units: usize,

    /// Units removed by the threshold
    pub filtered_below_threshold: usize,

    /// Units in the final output
    pub included: usize,
}

impl FilterMetrics {
    /// Percentage of units included.
    pub fn inclusion_rate(&self) -> f64 {
        if self.total_units == 0 {
            0.0
        } else {
            (self.included as f64 / self.total_units as f64) * 100.0
        }
    }
}

/// Units that passed filtering plus the filtering metrics.
#[derive(Debug, Clone)]
pub struct FilterResult {
    pub included: Vec<UnitReport>,
    pub metrics: FilterMetrics,
}

/// Sort units by descending total. Equal totals keep their input order.
pub fn rank_units(mut units: Vec<UnitReport>) -> Vec<UnitReport> {
    units.sort_by(|a, b| b.total().total_cmp(&a.total()));
    units
}

/// Number of units a percentage threshold keeps out of `n`.
pub fn percent_cutoff(n: usize, pct: f64) -> usize {
    let cutoff = (n as f64 * pct / 100.0).ceil();
    (cutoff.max(0.0) as usize).min(n)
}

/// Apply a threshold to already ranked units.
pub fn apply_threshold(ranked: Vec<UnitReport>, threshold: Threshold) -> FilterResult {
    let total_units = ranked.len();
    let included: Vec<UnitReport> = match threshold {
        Threshold::Percent(pct) => {
            let cutoff = percent_cutoff(total_units, pct);
            ranked.into_iter().take(cutoff).collect()
        }
        Threshold::MinScore(min) => ranked.into_iter().filter(|u| u.total() >= min).collect(),
    };

    let metrics = FilterMetrics {
        total_units,
        filtered_below_threshold: total_units - included.len(),
        included: included.len(),
    };
    tracing::debug!(
        "Threshold {} kept {}/{} unit(s)",
        threshold,
        metrics.included,
        metrics.total_units
    );
    FilterResult { included, metrics }
}

/// No threshold: everything passes.
pub fn keep_all(ranked: Vec<UnitReport>) -> FilterResult {
    let n = ranked.len();
    FilterResult {
        included: ranked,
        metrics: FilterMetrics {
            total_units: n,
            filtered_below_threshold: 0,
            included: n,
        },
    }
}
