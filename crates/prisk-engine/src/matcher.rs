//! # Rule Matcher
//!
//! Scans every rule in file order and folds the effects of the matching
//! ones into a [`Decision`].
//!
//! ## Merge Semantics
//!
//! ```text
//! level      highest severity wins (precedence table order)
//! level_min  last matching rule wins
//! dpo        last matching rule wins
//! reg        last matching rule wins
//! report     last matching rule wins
//! ```
//!
//! The scan never stops early, so the chosen `level` does not depend on
//! where in the file the most severe matching rule sits.

use prisk_core::{FactBase, FactValue, PrecedenceTable, Severity};
use prisk_rules::{Effect, Rule, RuleSet};

use crate::context::EvalContext;
use crate::trace::{Diagnostic, EvaluationTrace, Stage};

/// Working state of one classification, between the rule scan and the
/// final result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decision {
    pub level: Option<Severity>,
    pub level_min: Option<Severity>,
    pub dpo: bool,
    pub reg: bool,
    pub report: bool,
}

impl Decision {
    /// Fold one rule's effects in.
    pub fn merge(&mut self, effect: &Effect, precedence: &PrecedenceTable) {
        if let Some(proposed) = &effect.level {
            let adopt = match &self.level {
                None => true,
                Some(current) => precedence.is_more_severe(proposed, current),
            };
            if adopt {
                self.level = Some(proposed.clone());
            }
        }
        if let Some(level_min) = &effect.level_min {
            self.level_min = Some(level_min.clone());
        }
        if let Some(dpo) = effect.dpo {
            self.dpo = dpo;
        }
        if let Some(reg) = effect.reg {
            self.reg = reg;
        }
        if let Some(report) = effect.report {
            self.report = report;
        }
    }

    /// Intermediate values as facts, for constraint conditions.
    pub(crate) fn as_facts(&self) -> [(&'static str, FactValue); 5] {
        let tag = |s: &Option<Severity>| {
            s.as_ref()
                .map_or(FactValue::Null, |s| FactValue::Str(s.as_str().to_string()))
        };
        [
            ("level", tag(&self.level)),
            ("level_min", tag(&self.level_min)),
            ("dpo", FactValue::Bool(self.dpo)),
            ("reg", FactValue::Bool(self.reg)),
            ("report", FactValue::Bool(self.report)),
        ]
    }
}

/// Scan all rules against the derived facts.
pub fn match_rules(rules: &RuleSet, facts: &FactBase, trace: &mut EvaluationTrace) -> Decision {
    let ctx = EvalContext::new(facts, &rules.thresholds);
    let mut decision = Decision::default();
    for rule in &rules.rules {
        if rule_holds(rule, &ctx, trace) {
            tracing::debug!(rule_index = rule.index, rule = %rule.label(), "rule matched");
            trace.matched_rules.push(rule.index);
            decision.merge(&rule.effect, &rules.precedence);
        }
    }
    decision
}

fn rule_holds(rule: &Rule, ctx: &EvalContext<'_>, trace: &mut EvaluationTrace) -> bool {
    match rule.condition.evaluate(ctx) {
        Ok(holds) => holds,
        Err(error) => {
            tracing::warn!(
                rule_index = rule.index,
                rule = %rule.label(),
                condition = rule.condition.source(),
                error = %error,
                "rule condition failed to evaluate; treating as not matched"
            );
            trace.diagnostics.push(Diagnostic {
                stage: Stage::Rule,
                index: rule.index,
                label: rule.label(),
                condition: rule.condition.source().to_string(),
                error: error.to_string(),
            });
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(json: serde_json::Value) -> RuleSet {
        prisk_rules::load_str(&json.to_string(), prisk_rules::SourceFormat::Json, None)
            .unwrap()
            .rules
    }

    fn facts(pairs: &[(&str, FactValue)]) -> FactBase {
        pairs.iter().map(|(k, v)| (*k, v.clone())).collect()
    }

    #[test]
    fn most_severe_level_wins_regardless_of_order() {
        for order in [["mid", "basic"], ["basic", "mid"]] {
            let set = rules(serde_json::json!({
                "precedence": ["high", "mid", "basic", "lone"],
                "rules": [
                    {"when": "true", "set": {"level": order[0]}},
                    {"when": "true", "set": {"level": order[1]}}
                ]
            }));
            let mut trace = EvaluationTrace::default();
            let decision = match_rules(&set, &FactBase::new(), &mut trace);
            assert_eq!(decision.level.unwrap().as_str(), "mid");
            assert_eq!(trace.matched_rules, vec![0, 1]);
        }
    }

    #[test]
    fn obligations_are_last_match_wins() {
        let set = rules(serde_json::json!({
            "precedence": ["high", "mid", "basic"],
            "rules": [
                {"when": "true", "set": {"dpo": true, "level_min": "high"}},
                {"when": "true", "set": {"dpo": false, "level_min": "basic"}},
                {"when": "false", "set": {"dpo": true}}
            ]
        }));
        let decision = match_rules(&set, &FactBase::new(), &mut EvaluationTrace::default());
        assert!(!decision.dpo);
        assert_eq!(decision.level_min.unwrap().as_str(), "basic");
        assert!(decision.level.is_none());
    }

    #[test]
    fn failing_condition_is_skipped_and_recorded() {
        let set = rules(serde_json::json!({
            "precedence": ["high", "mid", "basic"],
            "rules": [
                {"id": "typo", "when": "pll > 3", "set": {"level": "high"}},
                {"when": "ppl > 3", "set": {"level": "mid"}},
                {"when": "ppl >>> 3", "set": {"level": "high"}}
            ]
        }));
        let mut trace = EvaluationTrace::default();
        let decision = match_rules(&set, &facts(&[("ppl", FactValue::Int(5))]), &mut trace);
        assert_eq!(decision.level.unwrap().as_str(), "mid");
        assert_eq!(trace.matched_rules, vec![1]);
        assert_eq!(trace.diagnostics.len(), 2);
        assert_eq!(trace.diagnostics[0].label, "typo");
        assert_eq!(trace.diagnostics[0].stage, Stage::Rule);
        assert_eq!(trace.diagnostics[1].index, 2);
    }

    #[test]
    fn thresholds_are_visible_to_conditions() {
        let set = rules(serde_json::json!({
            "precedence": ["mid", "basic"],
            "thresholds": {"ppl_mid": 100},
            "rules": [{"when": "ppl >= ppl_mid", "set": {"reg": true}}]
        }));
        let decision = match_rules(
            &set,
            &facts(&[("ppl", FactValue::Int(100))]),
            &mut EvaluationTrace::default(),
        );
        assert!(decision.reg);
    }
}
