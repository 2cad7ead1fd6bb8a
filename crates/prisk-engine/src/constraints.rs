//! # Constraint Enforcer
//!
//! Runs after the rule scan and the fallback. Each constraint sees the
//! facts plus the working `level`, `level_min`, `dpo`, `reg` and `report`,
//! and its enforcement applies before the next constraint is evaluated.
//!
//! A `level_min` enforcement can only raise the working level. A `dpo`
//! enforcement overwrites the flag; the coupling pass runs afterwards, so
//! a forced `false` cannot break `report => dpo` or `reg => dpo`.

use prisk_core::FactBase;
use prisk_rules::{Constraint, RuleSet};

use crate::context::EvalContext;
use crate::matcher::Decision;
use crate::trace::{Diagnostic, EvaluationTrace, Stage};

/// Apply every satisfied constraint to `decision`, in file order.
pub fn enforce_constraints(
    rules: &RuleSet,
    facts: &FactBase,
    decision: &mut Decision,
    trace: &mut EvaluationTrace,
) {
    let precedence = &rules.precedence;
    for constraint in &rules.constraints {
        let ctx = decision
            .as_facts()
            .into_iter()
            .fold(EvalContext::new(facts, &rules.thresholds), |ctx, (name, value)| {
                ctx.with(name, value)
            });
        if !constraint_holds(constraint, &ctx, trace) {
            continue;
        }
        tracing::debug!(
            constraint_index = constraint.index,
            constraint = %constraint.label(),
            "constraint applied"
        );
        trace.applied_constraints.push(constraint.index);

        let enforcement = &constraint.enforcement;
        if let Some(floor) = &enforcement.level_min {
            decision.level = Some(match decision.level.take() {
                Some(level) => precedence.at_least(level, floor),
                None => floor.clone(),
            });
            decision.level_min = Some(match decision.level_min.take() {
                Some(current) => precedence.at_least(current, floor),
                None => floor.clone(),
            });
        }
        if let Some(dpo) = enforcement.dpo {
            decision.dpo = dpo;
        }
    }
}

fn constraint_holds(
    constraint: &Constraint,
    ctx: &EvalContext<'_>,
    trace: &mut EvaluationTrace,
) -> bool {
    match constraint.condition.evaluate(ctx) {
        Ok(holds) => holds,
        Err(error) => {
            tracing::warn!(
                constraint_index = constraint.index,
                constraint = %constraint.label(),
                condition = constraint.condition.source(),
                error = %error,
                "constraint condition failed to evaluate; treating as not satisfied"
            );
            trace.diagnostics.push(Diagnostic {
                stage: Stage::Constraint,
                index: constraint.index,
                label: constraint.label(),
                condition: constraint.condition.source().to_string(),
                error: error.to_string(),
            });
            false
        }
    }
}
