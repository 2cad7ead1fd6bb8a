//! # prisk-expr — Rule Condition Language
//!
//! Rule and constraint conditions are short boolean expressions such as
//!
//! ```text
//! ppl >= ppl_mid and (sensitive or "health" in sensitive_types)
//! 0 < access <= access_basic_max and not ethics
//! ```
//!
//! They are parsed once, at rule-set load time, into an [`Expr`] tree and
//! evaluated per request against a [`Context`] that resolves identifiers
//! to [`FactValue`](prisk_core::FactValue)s.
//!
//! ## Security Invariant
//!
//! The language is closed. The grammar has no function calls, no
//! attribute access, no indexing and no arithmetic, and the evaluator
//! only reads from the context it is handed. A condition string coming
//! from a configuration file can compare and combine facts; it cannot
//! do anything else.
//!
//! ## Grammar
//!
//! ```text
//! expr       := or
//! or         := and ( "or" and )*
//! and        := not ( "and" not )*
//! not        := "not" not | comparison
//! comparison := operand ( compop operand )*
//! compop     := "==" | "!=" | "<" | "<=" | ">" | ">=" | "in" | "not" "in"
//! operand    := INT | FLOAT | STRING | true | false | none | IDENT
//!             | "(" expr ")" | "[" ( operand ( "," operand )* )? "]"
//! ```

pub mod ast;
pub mod error;
pub mod eval;
pub mod parser;
pub mod token;

pub use ast::{CompareOp, Expr};
pub use error::ExprError;
pub use eval::{evaluate, Context};
pub use parser::parse;

/// A parsed condition together with its source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    source: String,
    expr: Expr,
}

impl Condition {
    /// Parse a condition string.
    ///
    /// # Errors
    ///
    /// Returns the first lexical or syntax error, with its byte offset.
    pub fn parse(source: &str) -> Result<Self, ExprError> {
        Ok(Self {
            source: source.to_string(),
            expr: parse(source)?,
        })
    }

    /// Evaluate against a context.
    ///
    /// # Errors
    ///
    /// Unknown identifiers and type-incompatible comparisons are errors.
    /// Callers that want fail-closed semantics treat `Err` as `false`.
    pub fn evaluate(&self, ctx: &dyn Context) -> Result<bool, ExprError> {
        evaluate(&self.expr, ctx)
    }

    /// The original condition text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Identifiers referenced by the condition, sorted and deduplicated.
    pub fn variables(&self) -> Vec<String> {
        let mut names = Vec::new();
        self.expr.collect_variables(&mut names);
        names.sort();
        names.dedup();
        names
    }
}
