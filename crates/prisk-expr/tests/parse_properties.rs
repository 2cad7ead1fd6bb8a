//! # Parser Robustness Properties
//!
//! Conditions come from an operator-edited file. Whatever is in that file,
//! parsing must return `Ok` or `Err`, never panic, and a condition that
//! parses must evaluate without panicking against any context.

use std::collections::BTreeMap;

use prisk_core::FactValue;
use prisk_expr::{Condition, ExprError};
use proptest::prelude::*;

fn context() -> BTreeMap<String, FactValue> {
    [
        ("a", FactValue::Int(1)),
        ("b", FactValue::Bool(true)),
        ("c", FactValue::List(vec!["x".into()])),
        ("d", FactValue::Str("text".into())),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

/// Token soup drawn from the language's own vocabulary, so a good share
/// of generated inputs are syntactically valid.
fn token_soup() -> impl Strategy<Value = String> {
    let atom = prop_oneof![
        Just("a"), Just("b"), Just("c"), Just("d"), Just("zz"),
        Just("and"), Just("or"), Just("not"), Just("in"),
        Just("=="), Just("!="), Just("<"), Just("<="), Just(">"), Just(">="),
        Just("("), Just(")"), Just("["), Just("]"), Just(","),
        Just("1"), Just("-2"), Just("2.5"), Just("'x'"), Just("true"), Just("None"),
    ];
    prop::collection::vec(atom, 0..16).prop_map(|parts| parts.join(" "))
}

proptest! {
    #[test]
    fn parse_never_panics_on_arbitrary_text(src in ".{0,80}") {
        let _ = Condition::parse(&src);
    }

    #[test]
    fn parsed_conditions_evaluate_without_panicking(src in token_soup()) {
        if let Ok(condition) = Condition::parse(&src) {
            match condition.evaluate(&context()) {
                Ok(_) => {}
                Err(e) => prop_assert!(!e.is_syntax(), "syntax error at evaluation: {e}"),
            }
        }
    }

    #[test]
    fn evaluation_is_deterministic(src in token_soup()) {
        if let Ok(condition) = Condition::parse(&src) {
            let first = condition.evaluate(&context());
            let second = condition.evaluate(&context());
            prop_assert_eq!(first, second);
        }
    }
}

#[test]
fn host_capabilities_are_not_expressible() {
    for src in [
        "__import__('os').system('id')",
        "open('/etc/passwd')",
        "a.__class__",
        "a[0]",
        "lambda: 1",
        "a if b else c",
    ] {
        let err = Condition::parse(src).expect_err(src);
        assert!(err.is_syntax(), "{src}: {err}");
    }
}

#[test]
fn variables_are_sorted_and_unique() {
    let condition = Condition::parse("ppl >= ppl_mid or (access > 3 and ppl < 10)").unwrap();
    assert_eq!(condition.variables(), vec!["access", "ppl", "ppl_mid"]);
    assert_eq!(condition.source(), "ppl >= ppl_mid or (access > 3 and ppl < 10)");
}

#[test]
fn unknown_variable_surfaces_as_evaluation_error() {
    let condition = Condition::parse("missing_field").unwrap();
    assert_eq!(
        condition.evaluate(&context()),
        Err(ExprError::UnknownVariable("missing_field".into()))
    );
}
