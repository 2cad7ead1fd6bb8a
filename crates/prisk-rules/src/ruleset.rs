//! # Compiled Rule Set
//!
//! A [`RuleSet`] is a [`RuleDocument`] after validation: severity tags are
//! resolved against the precedence table, thresholds have their defaults,
//! and every condition string has been parsed once.

use std::collections::BTreeSet;

use serde_json::{Map, Value};

use prisk_core::{PrecedenceTable, Severity};
use prisk_expr::{Condition, Context, ExprError};

use crate::document::{ConstraintSpec, RuleDocument, RuleSpec};
use crate::error::RuleLoadError;
use crate::thresholds::ThresholdTable;

/// Tiers the fallback classifier may produce; both must be configured.
pub const FALLBACK_TIERS: [&str; 2] = ["basic", "mid"];

/// Working-decision names visible to constraint conditions.
pub const DECISION_FIELDS: [&str; 5] = ["level", "level_min", "dpo", "reg", "report"];

/// The fallback tiers, resolved against the precedence table.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackTiers {
    /// Minimal tier for submissions inside the basic boundary.
    pub basic: Severity,
    /// Default when nothing else decides the level.
    pub mid: Severity,
}

/// A condition after load-time parsing.
#[derive(Debug, Clone)]
pub enum CompiledCondition {
    /// Parsed successfully.
    Valid(Condition),
    /// Failed to parse. Never matches; every evaluation reports `error`.
    Invalid { source: String, error: ExprError },
}

impl CompiledCondition {
    /// Parse a condition, keeping a syntax error instead of failing.
    pub fn compile(source: &str) -> Self {
        match Condition::parse(source) {
            Ok(condition) => Self::Valid(condition),
            Err(error) => Self::Invalid {
                source: source.to_string(),
                error,
            },
        }
    }

    /// Evaluate against a context.
    pub fn evaluate(&self, ctx: &dyn Context) -> Result<bool, ExprError> {
        match self {
            Self::Valid(condition) => condition.evaluate(ctx),
            Self::Invalid { error, .. } => Err(error.clone()),
        }
    }

    /// The condition text as written.
    pub fn source(&self) -> &str {
        match self {
            Self::Valid(condition) => condition.source(),
            Self::Invalid { source, .. } => source,
        }
    }

    /// Identifiers the condition reads. Empty when it did not parse.
    pub fn variables(&self) -> Vec<String> {
        match self {
            Self::Valid(condition) => condition.variables(),
            Self::Invalid { .. } => Vec::new(),
        }
    }

    /// The parse error, if the condition did not compile.
    pub fn syntax_error(&self) -> Option<&ExprError> {
        match self {
            Self::Valid(_) => None,
            Self::Invalid { error, .. } => Some(error),
        }
    }
}

/// Effects of a matching rule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Effect {
    pub level: Option<Severity>,
    pub level_min: Option<Severity>,
    pub dpo: Option<bool>,
    pub reg: Option<bool>,
    pub report: Option<bool>,
}

/// A compiled rule.
#[derive(Debug, Clone)]
pub struct Rule {
    /// Position in the document.
    pub index: usize,
    /// Optional identifier from the document.
    pub id: Option<String>,
    pub condition: CompiledCondition,
    pub effect: Effect,
}

impl Rule {
    /// Identifier for logs: the configured id, or `rules[i]`.
    pub fn label(&self) -> String {
        self.id.clone().unwrap_or_else(|| format!("rules[{}]", self.index))
    }
}

/// Enforcements of a satisfied constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Enforcement {
    pub level_min: Option<Severity>,
    pub dpo: Option<bool>,
}

/// A compiled constraint.
#[derive(Debug, Clone)]
pub struct Constraint {
    /// Position in the document.
    pub index: usize,
    /// Optional identifier from the document.
    pub id: Option<String>,
    pub condition: CompiledCondition,
    pub enforcement: Enforcement,
}

impl Constraint {
    /// Identifier for logs: the configured id, or `constraints[i]`.
    pub fn label(&self) -> String {
        self.id
            .clone()
            .unwrap_or_else(|| format!("constraints[{}]", self.index))
    }
}

/// A validated, compiled rule document.
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub version: Option<String>,
    pub precedence: PrecedenceTable,
    pub thresholds: ThresholdTable,
    pub fallback: FallbackTiers,
    pub rules: Vec<Rule>,
    pub constraints: Vec<Constraint>,
    pub defaults: Map<String, Value>,
}

impl RuleSet {
    /// Validate and compile a document.
    ///
    /// # Errors
    ///
    /// Fails on a malformed precedence table, a missing fallback tier, a
    /// severity tag outside the table, or invalid thresholds. Condition
    /// syntax errors do not fail compilation.
    pub fn compile(doc: RuleDocument) -> Result<Self, RuleLoadError> {
        let precedence =
            PrecedenceTable::new(doc.precedence).map_err(RuleLoadError::Precedence)?;
        let [basic, mid] = FALLBACK_TIERS.map(|tier| {
            precedence
                .resolve(tier)
                .map_err(|_| RuleLoadError::MissingFallbackTier { tier })
        });
        let fallback = FallbackTiers {
            basic: basic?,
            mid: mid?,
        };
        let thresholds = ThresholdTable::new(doc.thresholds)?;

        let rules = doc
            .rules
            .into_iter()
            .enumerate()
            .map(|(index, spec)| compile_rule(&precedence, index, spec))
            .collect::<Result<Vec<_>, _>>()?;
        let constraints = doc
            .constraints
            .into_iter()
            .enumerate()
            .map(|(index, spec)| compile_constraint(&precedence, index, spec))
            .collect::<Result<Vec<_>, _>>()?;

        let set = Self {
            version: doc.version,
            precedence,
            thresholds,
            fallback,
            rules,
            constraints,
            defaults: doc.defaults,
        };
        for (label, error) in set.syntax_errors() {
            tracing::warn!(
                target: "prisk::rules",
                entry = %label,
                error = %error,
                "condition does not parse; entry will never match"
            );
        }
        Ok(set)
    }

    /// Entries whose condition failed to parse, as `(label, error)`.
    pub fn syntax_errors(&self) -> Vec<(String, &ExprError)> {
        let rules = self
            .rules
            .iter()
            .filter_map(|r| r.condition.syntax_error().map(|e| (r.label(), e)));
        let constraints = self
            .constraints
            .iter()
            .filter_map(|c| c.condition.syntax_error().map(|e| (c.label(), e)));
        rules.chain(constraints).collect()
    }

    /// Answer fields read by any condition: referenced names that are
    /// neither thresholds nor decision fields.
    pub fn referenced_fields(&self) -> BTreeSet<String> {
        let conditions = self
            .rules
            .iter()
            .map(|r| &r.condition)
            .chain(self.constraints.iter().map(|c| &c.condition));
        conditions
            .flat_map(CompiledCondition::variables)
            .filter(|name| {
                self.thresholds.get(name).is_none() && !DECISION_FIELDS.contains(&name.as_str())
            })
            .collect()
    }
}

fn resolve(
    precedence: &PrecedenceTable,
    tag: Option<String>,
    location: impl FnOnce() -> String,
) -> Result<Option<Severity>, RuleLoadError> {
    tag.map(|t| {
        precedence
            .resolve(&t)
            .map_err(|source| RuleLoadError::UnknownLevel {
                location: location(),
                source,
            })
    })
    .transpose()
}

fn compile_rule(
    precedence: &PrecedenceTable,
    index: usize,
    spec: RuleSpec,
) -> Result<Rule, RuleLoadError> {
    let effect = Effect {
        level: resolve(precedence, spec.set.level, || format!("rules[{index}].set.level"))?,
        level_min: resolve(precedence, spec.set.level_min, || {
            format!("rules[{index}].set.level_min")
        })?,
        dpo: spec.set.dpo,
        reg: spec.set.reg,
        report: spec.set.report,
    };
    Ok(Rule {
        index,
        id: spec.id,
        condition: CompiledCondition::compile(&spec.when),
        effect,
    })
}

fn compile_constraint(
    precedence: &PrecedenceTable,
    index: usize,
    spec: ConstraintSpec,
) -> Result<Constraint, RuleLoadError> {
    let enforcement = Enforcement {
        level_min: resolve(precedence, spec.enforce.level_min, || {
            format!("constraints[{index}].enforce.level_min")
        })?,
        dpo: spec.enforce.dpo,
    };
    Ok(Constraint {
        index,
        id: spec.id,
        condition: CompiledCondition::compile(&spec.condition),
        enforcement,
    })
}
