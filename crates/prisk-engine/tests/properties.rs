//! Property tests over the shipped rule repository.

use proptest::prelude::*;

use prisk_engine::{classify, classify_traced, derive, derive_requirements};
use prisk_rules::{load_str, RuleSet, SourceFormat};
use serde_json::{json, Map, Value};

const SHIPPED_RULES: &str = include_str!("../../../config/security_rules.json");

fn shipped() -> RuleSet {
    load_str(SHIPPED_RULES, SourceFormat::Json, None).unwrap().rules
}

fn with_constraint(extra: Value) -> RuleSet {
    let mut doc: Value = serde_json::from_str(SHIPPED_RULES).unwrap();
    doc["constraints"].as_array_mut().unwrap().push(extra);
    load_str(&doc.to_string(), SourceFormat::Json, None).unwrap().rules
}

fn flag() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        prop::sample::select(vec!["yes", "no", "true", "false", "כן", "לא", ""])
            .prop_map(|s| Value::String(s.to_string())),
    ]
}

fn count() -> impl Strategy<Value = Value> {
    prop_oneof![
        (0i64..300_000).prop_map(|n| json!(n)),
        (0i64..300_000).prop_map(|n| Value::String(n.to_string())),
    ]
}

fn answers() -> impl Strategy<Value = Map<String, Value>> {
    let flags = prop::collection::vec(flag(), 12);
    let counts = prop::collection::vec(count(), 5);
    let types = prop::collection::vec(
        prop::sample::select(vec!["health", "genetic", "biometric", "criminal", "sexual"]),
        0..3,
    );
    (flags, counts, types).prop_map(|(flags, counts, types)| {
        let flag_names = [
            "sensitive",
            "biometric_100k",
            "ethics",
            "transfer",
            "directmail_biz",
            "directmail_self",
            "large_scale_monitoring",
            "employees_exposed",
            "cameras",
            "processor",
            "processor_sensitive_org",
            "processor_large_org",
        ];
        let count_names = ["sensitive_people", "ppl", "biometric_people", "owners", "access"];
        let mut map = Map::new();
        for (name, value) in flag_names.iter().zip(flags) {
            map.insert((*name).to_string(), value);
        }
        for (name, value) in count_names.iter().zip(counts) {
            map.insert((*name).to_string(), value);
        }
        map.insert("sensitive_types".into(), json!(types));
        map
    })
}

proptest! {
    #[test]
    fn classification_is_deterministic(input in answers()) {
        let rules = shipped();
        let a = serde_json::to_string(&classify(&rules, &input)).unwrap();
        let b = serde_json::to_string(&classify(&rules, &input)).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn obligations_are_closed_under_implication(input in answers()) {
        let result = classify(&shipped(), &input);
        prop_assert!(!result.report || result.dpo);
        prop_assert!(!result.reg || result.dpo);
    }

    #[test]
    fn level_is_always_configured(input in answers()) {
        let rules = shipped();
        let result = classify(&rules, &input);
        prop_assert!(rules.precedence.contains(result.level.as_str()));
    }

    #[test]
    fn derivation_never_lowers_counts(input in answers()) {
        let rules = shipped();
        let normalized = prisk_core::normalize_answers(&input);
        let derived = derive(&normalized, &rules.thresholds);
        for name in ["ppl", "sensitive_people", "biometric_people"] {
            prop_assert!(derived.count(name) >= normalized.count(name), "{}", name);
        }
        prop_assert!(derived.count("ppl") >= derived.count("sensitive_people"));
    }

    #[test]
    fn added_floor_never_lowers_level(input in answers(), tier in 0usize..4) {
        let base = shipped();
        let floor = base.precedence.levels()[tier].clone();
        let floored = with_constraint(json!({"if": "true", "enforce": {"level_min": floor}}));

        let before = classify(&base, &input).level;
        let after = classify(&floored, &input).level;
        let floor = floored.precedence.resolve(&floor).unwrap();

        prop_assert!(floored.precedence.rank(&after) <= floored.precedence.rank(&before));
        prop_assert!(floored.precedence.rank(&after) <= floored.precedence.rank(&floor));
    }

    #[test]
    fn requirements_are_idempotent(input in answers()) {
        let (_, trace) = classify_traced(&shipped(), &input);
        let once = derive_requirements(&trace.facts);
        let twice = derive_requirements(&trace.facts);
        prop_assert_eq!(&once, &twice);
        let mut unique = once.clone();
        unique.sort();
        unique.dedup();
        prop_assert_eq!(unique.len(), once.len());
    }
}
