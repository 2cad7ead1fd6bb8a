//! # Answer Normalization
//!
//! Coerces raw questionnaire answers (as they arrive from form webhooks,
//! the CLI or the HTTP surface) into typed [`FactValue`]s.
//!
//! Normalization is fail-open: nothing here returns an error. A value
//! that cannot be coerced is kept as it was, and it is up to the rules to
//! decide what an odd value means.
//!
//! ## Token Sets
//!
//! Strings are trimmed and compared case-insensitively. The Hebrew
//! yes/no words are accepted because the intake forms are bilingual.
//!
//! | Truthy                              | Falsy                                     |
//! |-------------------------------------|-------------------------------------------|
//! | `true` `yes` `y` `on` `1` `כן`      | `false` `no` `n` `off` `0` `""` `לא`      |

use serde_json::{Map, Value};

use crate::facts::FactBase;
use crate::value::FactValue;

const TRUTHY: &[&str] = &["true", "yes", "y", "on", "1", "כן"];
const FALSY: &[&str] = &["false", "no", "n", "off", "0", "", "לא"];

/// Normalize a whole answer object into a fact base.
pub fn normalize_answers(raw: &Map<String, Value>) -> FactBase {
    raw.iter()
        .map(|(name, value)| (name.clone(), normalize_value(value)))
        .collect()
}

/// Normalize a single raw JSON value.
pub fn normalize_value(value: &Value) -> FactValue {
    match value {
        Value::Null => FactValue::Null,
        Value::Bool(b) => FactValue::Bool(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => FactValue::Int(i),
            None => FactValue::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => normalize_str(s),
        Value::Array(items) => FactValue::List(items.iter().map(list_item).collect()),
        Value::Object(_) => {
            tracing::debug!("object-valued answer kept as opaque text");
            FactValue::Str(value.to_string())
        }
    }
}

/// Normalize a single string answer.
pub fn normalize_str(raw: &str) -> FactValue {
    let token = raw.trim().to_lowercase();
    if TRUTHY.contains(&token.as_str()) {
        return FactValue::Bool(true);
    }
    if FALSY.contains(&token.as_str()) {
        return FactValue::Bool(false);
    }
    match token.parse::<i64>() {
        Ok(n) => FactValue::Int(n),
        Err(_) => FactValue::Str(raw.to_string()),
    }
}

fn list_item(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn english_tokens() {
        assert_eq!(normalize_str("Yes"), FactValue::Bool(true));
        assert_eq!(normalize_str("TRUE"), FactValue::Bool(true));
        assert_eq!(normalize_str(" no "), FactValue::Bool(false));
        assert_eq!(normalize_str("False"), FactValue::Bool(false));
    }

    #[test]
    fn hebrew_tokens() {
        assert_eq!(normalize_str("כן"), FactValue::Bool(true));
        assert_eq!(normalize_str("לא"), FactValue::Bool(false));
    }

    #[test]
    fn zero_and_one_are_booleans() {
        assert_eq!(normalize_str("1"), FactValue::Bool(true));
        assert_eq!(normalize_str("0"), FactValue::Bool(false));
    }

    #[test]
    fn empty_string_is_false() {
        assert_eq!(normalize_str(""), FactValue::Bool(false));
        assert_eq!(normalize_str("   "), FactValue::Bool(false));
    }

    #[test]
    fn integers_parse() {
        assert_eq!(normalize_str("500"), FactValue::Int(500));
        assert_eq!(normalize_str(" 12000 "), FactValue::Int(12_000));
        assert_eq!(normalize_str("-4"), FactValue::Int(-4));
    }

    #[test]
    fn unparseable_text_is_kept_verbatim() {
        assert_eq!(normalize_str(" about 500 "), FactValue::Str(" about 500 ".into()));
        assert_eq!(normalize_str("1,000"), FactValue::Str("1,000".into()));
    }

    #[test]
    fn non_strings_pass_through() {
        assert_eq!(normalize_value(&json!(true)), FactValue::Bool(true));
        assert_eq!(normalize_value(&json!(42)), FactValue::Int(42));
        assert_eq!(normalize_value(&json!(2.5)), FactValue::Float(2.5));
        assert_eq!(normalize_value(&json!(null)), FactValue::Null);
    }

    #[test]
    fn arrays_become_string_lists() {
        let v = normalize_value(&json!(["health", 3, true]));
        assert_eq!(
            v,
            FactValue::List(vec!["health".into(), "3".into(), "true".into()])
        );
    }

    #[test]
    fn whole_object() {
        let raw = json!({"ppl": "500", "cameras": "yes", "owners": 1});
        let facts = normalize_answers(raw.as_object().unwrap());
        assert_eq!(facts.get("ppl"), Some(&FactValue::Int(500)));
        assert_eq!(facts.get("cameras"), Some(&FactValue::Bool(true)));
        assert_eq!(facts.get("owners"), Some(&FactValue::Int(1)));
    }

    proptest::proptest! {
        #[test]
        fn padded_integers_parse(n in proptest::num::i64::ANY, pad in "[ \t]{0,3}") {
            let expected = match n {
                0 => FactValue::Bool(false),
                1 => FactValue::Bool(true),
                n => FactValue::Int(n),
            };
            proptest::prop_assert_eq!(normalize_str(&format!("{pad}{n}{pad}")), expected);
        }

        #[test]
        fn unrecognized_text_is_kept_verbatim(raw in "[a-z ]{2,12}x") {
            proptest::prop_assert_eq!(normalize_str(&raw), FactValue::Str(raw.clone()));
        }
    }
}
