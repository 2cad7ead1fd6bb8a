//! # Classification Pipeline
//!
//! ```text
//! raw answers
//!   └─ defaults ─ normalize ─ derive
//!        └─ rule scan ─ fallback (no level) ─ level_min floor ─ constraints
//!             └─ requirements ─ coupling ─ ClassificationResult
//! ```
//!
//! The pipeline is a pure function of the rule set and the answers: no
//! I/O, no shared mutable state, and the same inputs always produce the
//! same result.

use serde::Serialize;
use serde_json::{Map, Value};

use prisk_core::{normalize_answers, FactBase, Severity};
use prisk_rules::RuleSet;

use crate::constraints::enforce_constraints;
use crate::coupling::{resolve_couplings, Obligations};
use crate::derive::derive;
use crate::fallback::fallback_level;
use crate::matcher::match_rules;
use crate::requirements::derive_requirements;
use crate::trace::EvaluationTrace;

/// Outcome of one classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    /// Severity tier, always a member of the rule set's precedence table.
    pub level: Severity,
    /// A data protection officer must be appointed.
    pub dpo: bool,
    /// The database must be registered.
    pub reg: bool,
    /// The database must be reported to the regulator.
    pub report: bool,
    /// Compliance documents required, in first-trigger order.
    pub requirements: Vec<String>,
}

/// Classify raw questionnaire answers.
pub fn classify(rules: &RuleSet, answers: &Map<String, Value>) -> ClassificationResult {
    classify_traced(rules, answers).0
}

/// Classify and report how the result was reached.
pub fn classify_traced(
    rules: &RuleSet,
    answers: &Map<String, Value>,
) -> (ClassificationResult, EvaluationTrace) {
    let facts = derive(&prepare(rules, answers), &rules.thresholds);
    let mut trace = EvaluationTrace::default();

    let mut decision = match_rules(rules, &facts, &mut trace);
    let mut level = match decision.level.take() {
        Some(level) => level,
        None => {
            trace.fallback_used = true;
            fallback_level(&facts, rules, decision.level_min.as_ref())
        }
    };
    if let Some(floor) = &decision.level_min {
        level = rules.precedence.at_least(level, floor);
    }
    decision.level = Some(level);

    enforce_constraints(rules, &facts, &mut decision, &mut trace);

    let requirements = derive_requirements(&facts);
    let obligations = resolve_couplings(
        Obligations {
            dpo: decision.dpo,
            reg: decision.reg,
            report: decision.report,
        },
        &facts,
        &rules.thresholds,
    );
    let level = decision
        .level
        .unwrap_or_else(|| rules.fallback.mid.clone());

    tracing::debug!(
        level = %level,
        dpo = obligations.dpo,
        reg = obligations.reg,
        report = obligations.report,
        matched = trace.matched_rules.len(),
        fallback = trace.fallback_used,
        "classified submission"
    );

    trace.facts = facts;
    let result = ClassificationResult {
        level,
        dpo: obligations.dpo,
        reg: obligations.reg,
        report: obligations.report,
        requirements,
    };
    (result, trace)
}

/// Fill repository defaults for unanswered fields, then normalize. An
/// explicit `null` counts as unanswered.
fn prepare(rules: &RuleSet, answers: &Map<String, Value>) -> FactBase {
    if rules.defaults.is_empty() {
        return normalize_answers(answers);
    }
    let mut merged = answers.clone();
    for (name, value) in &rules.defaults {
        if merged.get(name).map_or(true, Value::is_null) {
            merged.insert(name.clone(), value.clone());
        }
    }
    normalize_answers(&merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rules(doc: Value) -> RuleSet {
        prisk_rules::load_str(&doc.to_string(), prisk_rules::SourceFormat::Json, None)
            .unwrap()
            .rules
    }

    fn answers(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn empty_rule_list_uses_fallback() {
        let set = rules(json!({"precedence": ["high", "mid", "basic"]}));
        let (result, trace) = classify_traced(&set, &answers(json!({"ppl": "20"})));
        assert_eq!(result.level.as_str(), "basic");
        assert!(trace.fallback_used);

        let (result, _) = classify_traced(&set, &answers(json!({"ethics": "yes"})));
        assert_eq!(result.level.as_str(), "mid");
    }

    #[test]
    fn rule_level_min_floors_the_rule_level() {
        let set = rules(json!({
            "precedence": ["high", "mid", "basic"],
            "rules": [
                {"when": "true", "set": {"level": "basic"}},
                {"when": "cameras", "set": {"level_min": "high"}}
            ]
        }));
        let result = classify(&set, &answers(json!({"cameras": true})));
        assert_eq!(result.level.as_str(), "high");
    }

    #[test]
    fn fallback_outside_boundary_uses_rule_level_min() {
        let set = rules(json!({
            "precedence": ["high", "mid", "basic"],
            "rules": [{"when": "ethics", "set": {"level_min": "high"}}]
        }));
        let (result, trace) = classify_traced(&set, &answers(json!({"ethics": "כן"})));
        assert_eq!(result.level.as_str(), "high");
        assert!(trace.fallback_used);
    }

    #[test]
    fn defaults_fill_only_missing_answers() {
        let set = rules(json!({
            "precedence": ["high", "mid", "basic"],
            "defaults": {"owners": "20"},
            "rules": [{"when": "owners > 10", "set": {"level": "high"}}]
        }));
        assert_eq!(classify(&set, &Map::new()).level.as_str(), "high");
        assert_eq!(
            classify(&set, &answers(json!({"owners": 1}))).level.as_str(),
            "basic"
        );
    }

    #[test]
    fn null_answer_takes_the_default() {
        let set = rules(json!({
            "precedence": ["high", "mid", "basic"],
            "defaults": {"owners": "20"},
            "rules": [{"when": "owners > 10", "set": {"level": "high"}}]
        }));
        let (result, trace) = classify_traced(&set, &answers(json!({"owners": null})));
        assert_eq!(result.level.as_str(), "high");
        assert_eq!(trace.facts.get("owners"), Some(&prisk_core::FactValue::Int(20)));
    }

    #[test]
    fn constraints_see_intermediate_obligations() {
        let set = rules(json!({
            "precedence": ["high", "mid", "basic"],
            "rules": [{"when": "transfer", "set": {"reg": true, "level": "mid"}}],
            "constraints": [{"if": "reg and level == 'mid'", "enforce": {"level_min": "high"}}]
        }));
        let (result, trace) = classify_traced(&set, &answers(json!({"transfer": "yes"})));
        assert_eq!(result.level.as_str(), "high");
        assert!(result.reg && result.dpo);
        assert_eq!(trace.applied_constraints, vec![0]);
    }

    #[test]
    fn traced_and_plain_results_agree() {
        let set = rules(json!({
            "precedence": ["high", "mid", "basic"],
            "rules": [{"when": "broken ==", "set": {"level": "high"}}]
        }));
        let input = answers(json!({"cameras": "1", "employees_exposed": "true"}));
        let (traced, trace) = classify_traced(&set, &input);
        assert_eq!(classify(&set, &input), traced);
        assert_eq!(trace.diagnostics.len(), 1);
        assert_eq!(
            serde_json::to_value(&traced).unwrap(),
            json!({
                "level": "basic",
                "dpo": false,
                "reg": false,
                "report": false,
                "requirements": ["worker_security_agreement", "cameras_policy"]
            })
        );
    }
}
