//! Evaluation trace returned by [`classify_traced`](crate::classify_traced).

use serde::Serialize;

use prisk_core::FactBase;

/// Which list a diagnostic came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Rule,
    Constraint,
}

/// A condition that failed to evaluate and was treated as not satisfied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub stage: Stage,
    /// Position of the entry in its list.
    pub index: usize,
    /// Configured id, or `rules[i]` / `constraints[i]`.
    pub label: String,
    pub condition: String,
    pub error: String,
}

/// How a classification was reached.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EvaluationTrace {
    /// Derived fact base the rules were evaluated against.
    pub facts: FactBase,
    /// Indices of rules whose condition held, in scan order.
    pub matched_rules: Vec<usize>,
    /// Indices of constraints whose condition held, in scan order.
    pub applied_constraints: Vec<usize>,
    /// Whether no rule set a level and the fallback classifier decided.
    pub fallback_used: bool,
    /// Swallowed evaluation errors.
    pub diagnostics: Vec<Diagnostic>,
}
