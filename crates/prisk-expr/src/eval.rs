//! Tree-walking evaluator.
//!
//! Values are [`FactValue`]s. `and`/`or`/`not` reduce to booleans by
//! truthiness and short-circuit left to right, so an unknown name on a
//! branch that is never reached is not an error.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use prisk_core::{FactBase, FactValue};

use crate::ast::{CompareOp, Expr};
use crate::error::ExprError;

/// Name resolution for evaluation.
pub trait Context {
    /// Resolve an identifier, or `None` if it is unknown.
    fn lookup(&self, name: &str) -> Option<FactValue>;
}

impl Context for FactBase {
    fn lookup(&self, name: &str) -> Option<FactValue> {
        self.get(name).cloned()
    }
}

impl Context for BTreeMap<String, FactValue> {
    fn lookup(&self, name: &str) -> Option<FactValue> {
        self.get(name).cloned()
    }
}

/// Evaluate an expression to a boolean.
pub fn evaluate(expr: &Expr, ctx: &dyn Context) -> Result<bool, ExprError> {
    Ok(value_of(expr, ctx)?.is_truthy())
}

fn value_of(expr: &Expr, ctx: &dyn Context) -> Result<FactValue, ExprError> {
    match expr {
        Expr::Literal(v) => Ok(v.clone()),
        Expr::Var(name) => ctx
            .lookup(name)
            .ok_or_else(|| ExprError::UnknownVariable(name.clone())),
        Expr::List(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                out.push(member_text(&value_of(item, ctx)?));
            }
            Ok(FactValue::List(out))
        }
        Expr::Not(inner) => Ok(FactValue::Bool(!evaluate(inner, ctx)?)),
        Expr::And(items) => {
            for item in items {
                if !evaluate(item, ctx)? {
                    return Ok(FactValue::Bool(false));
                }
            }
            Ok(FactValue::Bool(true))
        }
        Expr::Or(items) => {
            for item in items {
                if evaluate(item, ctx)? {
                    return Ok(FactValue::Bool(true));
                }
            }
            Ok(FactValue::Bool(false))
        }
        Expr::Compare { first, rest } => {
            let mut left = value_of(first, ctx)?;
            for (op, operand) in rest {
                let right = value_of(operand, ctx)?;
                if !compare(*op, &left, &right)? {
                    return Ok(FactValue::Bool(false));
                }
                left = right;
            }
            Ok(FactValue::Bool(true))
        }
    }
}

/// Apply one comparison operator.
pub fn compare(op: CompareOp, left: &FactValue, right: &FactValue) -> Result<bool, ExprError> {
    match op {
        CompareOp::Eq => Ok(equals(left, right)),
        CompareOp::Ne => Ok(!equals(left, right)),
        CompareOp::In => contains(right, left),
        CompareOp::NotIn => contains(right, left).map(|found| !found),
        CompareOp::Lt | CompareOp::Le | CompareOp::Gt | CompareOp::Ge => {
            let Some(ordering) = order(op, left, right)? else {
                // NaN is unordered: every ordering comparison is false.
                return Ok(false);
            };
            Ok(match op {
                CompareOp::Lt => ordering == Ordering::Less,
                CompareOp::Le => ordering != Ordering::Greater,
                CompareOp::Gt => ordering == Ordering::Greater,
                _ => ordering != Ordering::Less,
            })
        }
    }
}

fn equals(left: &FactValue, right: &FactValue) -> bool {
    match (left, right) {
        (FactValue::Null, FactValue::Null) => true,
        (FactValue::Str(a), FactValue::Str(b)) => a == b,
        (FactValue::List(a), FactValue::List(b)) => a == b,
        (a, b) => match (a.as_number(), b.as_number()) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        },
    }
}

fn order(op: CompareOp, left: &FactValue, right: &FactValue) -> Result<Option<Ordering>, ExprError> {
    if let (FactValue::Str(a), FactValue::Str(b)) = (left, right) {
        return Ok(Some(a.cmp(b)));
    }
    match (left.as_number(), right.as_number()) {
        (Some(x), Some(y)) => Ok(x.partial_cmp(&y)),
        _ => Err(ExprError::TypeMismatch {
            op: op.symbol(),
            left: left.kind(),
            right: right.kind(),
        }),
    }
}

fn contains(haystack: &FactValue, needle: &FactValue) -> Result<bool, ExprError> {
    match (haystack, needle) {
        (FactValue::List(items), needle) => {
            let text = member_text(needle);
            Ok(items.iter().any(|item| *item == text))
        }
        (FactValue::Str(text), FactValue::Str(part)) => Ok(text.contains(part.as_str())),
        _ => Err(ExprError::TypeMismatch {
            op: "in",
            left: needle.kind(),
            right: haystack.kind(),
        }),
    }
}

/// String form used for list membership.
fn member_text(value: &FactValue) -> String {
    match value {
        FactValue::Str(s) => s.clone(),
        other => other.to_string(),
    }
}
