//! # Fact Values
//!
//! [`FactValue`] is the typed shape of a single normalized answer. The
//! questionnaire only ever produces booleans, integer counts and lists of
//! category tags, but normalization is fail-open, so unparseable strings,
//! non-integral numbers and nulls survive as their own variants.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A normalized fact value.
///
/// Serializes untagged, so a fact base renders as plain JSON
/// (`{"ppl": 500, "cameras": true, "sensitive_types": ["health"]}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FactValue {
    /// Explicit absence of a value (`null` in the submission).
    Null,
    /// A yes/no answer.
    Bool(bool),
    /// A count or other integral answer.
    Int(i64),
    /// A non-integral number. Retained as-is; never produced from strings.
    Float(f64),
    /// Free text that did not coerce to anything else.
    Str(String),
    /// A multi-select answer, e.g. the categories of sensitive data held.
    List(Vec<String>),
}

impl FactValue {
    /// Truthiness used by the expression language and by the fixed-logic
    /// components: `false`, zero, empty text, empty list and null are false.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Int(n) => *n != 0,
            Self::Float(f) => *f != 0.0,
            Self::Str(s) => !s.is_empty(),
            Self::List(items) => !items.is_empty(),
        }
    }

    /// Numeric view for counts. Booleans count as 0/1, integral floats are
    /// truncated, everything else has no numeric reading.
    pub fn as_count(&self) -> Option<i64> {
        match self {
            Self::Bool(b) => Some(i64::from(*b)),
            Self::Int(n) => Some(*n),
            Self::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(*f as i64),
            _ => None,
        }
    }

    /// Numeric view as `f64`, for comparisons that mix integers and floats.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::Int(n) => Some(*n as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// The list payload, if this is a list.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Short kind name for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::List(_) => "list",
        }
    }
}

impl fmt::Display for FactValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => f.write_str(s),
            Self::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

impl From<bool> for FactValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for FactValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<&str> for FactValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<Vec<String>> for FactValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthiness_of_each_kind() {
        assert!(!FactValue::Null.is_truthy());
        assert!(!FactValue::Bool(false).is_truthy());
        assert!(!FactValue::Int(0).is_truthy());
        assert!(!FactValue::Str(String::new()).is_truthy());
        assert!(!FactValue::List(vec![]).is_truthy());
        assert!(FactValue::Int(-3).is_truthy());
        assert!(FactValue::Str("x".into()).is_truthy());
        assert!(FactValue::List(vec!["health".into()]).is_truthy());
    }

    #[test]
    fn count_view() {
        assert_eq!(FactValue::Bool(true).as_count(), Some(1));
        assert_eq!(FactValue::Int(42).as_count(), Some(42));
        assert_eq!(FactValue::Float(7.0).as_count(), Some(7));
        assert_eq!(FactValue::Float(7.5).as_count(), None);
        assert_eq!(FactValue::Str("7".into()).as_count(), None);
    }

    #[test]
    fn serializes_untagged() {
        let json = serde_json::to_value(FactValue::List(vec!["a".into()])).unwrap();
        assert_eq!(json, serde_json::json!(["a"]));
        let json = serde_json::to_value(FactValue::Int(3)).unwrap();
        assert_eq!(json, serde_json::json!(3));
        let json = serde_json::to_value(FactValue::Null).unwrap();
        assert_eq!(json, serde_json::Value::Null);
    }

    #[test]
    fn display_list() {
        let v = FactValue::List(vec!["health".into(), "biometric".into()]);
        assert_eq!(v.to_string(), "[health, biometric]");
    }
}
