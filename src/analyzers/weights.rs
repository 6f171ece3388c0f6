//! Static pattern → weight tables, one per built-in mode.
//!
//! Keys are driver kinds, so a configured override such as
//! `IfStatement = 2.0` addresses exactly the label shown in reports.

use std::collections::{BTreeMap, HashMap};

/// Baseline weights for the general-purpose scorer.
pub const LANG_WEIGHTS: &[(&str, f64)] = &[
    ("IfStatement", 1.0),
    ("ConditionalExpression", 1.0),
    ("LogicalExpression", 0.5),
    ("ForStatement", 1.0),
    ("WhileStatement", 1.0),
    ("DoWhileStatement", 1.0),
    ("ForOfStatement", 1.0),
    ("ForInStatement", 1.0),
    ("SwitchStatement", 1.0),
    ("SwitchCase", 0.2),
    ("TryStatement", 1.5),
    ("CatchClause", 0.5),
    ("ThrowStatement", 0.5),
    ("AwaitExpression", 0.5),
    ("YieldExpression", 0.5),
    ("CallExpression", 0.1),
    ("DynamicCall", 4.0),
    ("DeepMember", 0.2),
    ("LogicalAssign", 0.4),
];

/// Baseline weights for the UI-component scorer.
pub const REACT_WEIGHTS: &[(&str, f64)] = &[
    ("JSX.Ternary", 1.0),
    ("JSX.Logical", 0.6),
    ("JSX.Map", 0.8),
    ("JSX.Inline", 0.4),
    ("JSX.DepthStep", 0.3),
    ("Hook.useEffect", 0.8),
    ("Hook.useEffect.dep", 0.15),
    ("Hook.useEffect.cleanup", 0.4),
    ("Hook.useLayoutEffect", 0.6),
    ("Hook.useContext", 0.3),
    ("Hook.useReducer", 0.6),
];

/// Immutable mapping from pattern identifier to a non-negative weight.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightTable {
    weights: BTreeMap<String, f64>,
}

impl WeightTable {
    pub fn from_pairs(pairs: &[(&str, f64)]) -> Self {
        Self {
            weights: pairs.iter().map(|(k, w)| (k.to_string(), *w)).collect(),
        }
    }

    pub fn lang() -> Self {
        Self::from_pairs(LANG_WEIGHTS)
    }

    pub fn react() -> Self {
        Self::from_pairs(REACT_WEIGHTS)
    }

    /// Replace the weights of known patterns. Unknown keys are left for the
    /// caller to report (see [`WeightTable::knows`]).
    pub fn with_overrides(mut self, overrides: &HashMap<String, f64>) -> Self {
        for (kind, weight) in overrides {
            if let Some(slot) = self.weights.get_mut(kind) {
                *slot = *weight;
            }
        }
        self
    }

    /// Weight for a pattern; `None` when the pattern is unknown or disabled (0).
    pub fn get(&self, kind: &str) -> Option<f64> {
        self.weights.get(kind).copied().filter(|w| *w > 0.0)
    }

    pub fn knows(&self, kind: &str) -> bool {
        self.weights.contains_key(kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.weights.iter().map(|(k, w)| (k.as_str(), *w))
    }
}
