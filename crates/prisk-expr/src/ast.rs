//! Condition syntax tree.

use prisk_core::FactValue;

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    In,
    NotIn,
}

impl CompareOp {
    /// Operator as written in a condition.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::In => "in",
            Self::NotIn => "not in",
        }
    }
}

/// A parsed condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value.
    Literal(FactValue),
    /// A fact or threshold name.
    Var(String),
    /// A bracketed list of operands.
    List(Vec<Expr>),
    /// Boolean negation.
    Not(Box<Expr>),
    /// Short-circuit conjunction over two or more operands.
    And(Vec<Expr>),
    /// Short-circuit disjunction over two or more operands.
    Or(Vec<Expr>),
    /// A comparison chain: `first op1 e1 op2 e2 ...` holds when every
    /// adjacent pair holds.
    Compare {
        first: Box<Expr>,
        rest: Vec<(CompareOp, Expr)>,
    },
}

impl Expr {
    pub(crate) fn collect_variables(&self, out: &mut Vec<String>) {
        match self {
            Self::Literal(_) => {}
            Self::Var(name) => out.push(name.clone()),
            Self::Not(inner) => inner.collect_variables(out),
            Self::List(items) | Self::And(items) | Self::Or(items) => {
                for item in items {
                    item.collect_variables(out);
                }
            }
            Self::Compare { first, rest } => {
                first.collect_variables(out);
                for (_, operand) in rest {
                    operand.collect_variables(out);
                }
            }
        }
    }
}
