//! Serde model of a rule document, before validation.
//!
//! Unknown keys are ignored so operators can annotate entries (e.g. a
//! `note` explaining the legal source of a rule).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A rule document as written on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleDocument {
    /// Free-form label for the document revision.
    #[serde(default)]
    pub version: Option<String>,
    /// Severity tags, most severe first.
    pub precedence: Vec<String>,
    /// Named numeric boundaries.
    #[serde(default)]
    pub thresholds: BTreeMap<String, f64>,
    /// Ordered rules.
    #[serde(default)]
    pub rules: Vec<RuleSpec>,
    /// Ordered post-scan constraints.
    #[serde(default)]
    pub constraints: Vec<ConstraintSpec>,
    /// Raw answer values applied when a submission omits the field.
    #[serde(default)]
    pub defaults: Map<String, Value>,
}

/// One `{when, set}` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSpec {
    /// Optional identifier used in logs and traces.
    #[serde(default)]
    pub id: Option<String>,
    /// Condition expression.
    pub when: String,
    /// Effects applied when the condition holds.
    #[serde(default)]
    pub set: EffectSpec,
}

/// Effects a rule may carry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EffectSpec {
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub level_min: Option<String>,
    #[serde(default)]
    pub dpo: Option<bool>,
    #[serde(default)]
    pub reg: Option<bool>,
    #[serde(default)]
    pub report: Option<bool>,
}

/// One `{if, enforce}` entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConstraintSpec {
    /// Optional identifier used in logs and traces.
    #[serde(default)]
    pub id: Option<String>,
    /// Condition expression.
    #[serde(rename = "if")]
    pub condition: String,
    /// Enforcement applied when the condition holds.
    #[serde(default)]
    pub enforce: EnforcementSpec,
}

/// Enforcements a constraint may carry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnforcementSpec {
    #[serde(default)]
    pub level_min: Option<String>,
    #[serde(default)]
    pub dpo: Option<bool>,
}
