//! Condition language errors.
//!
//! Lexical and syntax errors carry a byte offset into the condition text.
//! Evaluation errors carry the name or kinds involved.

use thiserror::Error;

/// Errors from parsing or evaluating a condition.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExprError {
    /// A character that cannot start any token.
    #[error("unexpected character {ch:?} at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },

    /// A string literal with no closing quote.
    #[error("unterminated string literal starting at offset {offset}")]
    UnterminatedString { offset: usize },

    /// A numeric literal that does not fit the number types.
    #[error("invalid number literal {literal:?} at offset {offset}")]
    InvalidNumber { literal: String, offset: usize },

    /// The parser found a token it cannot use here.
    #[error("expected {expected} at offset {offset}, found {found}")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
        offset: usize,
    },

    /// Nesting exceeds the parser's depth limit.
    #[error("condition nests deeper than {limit} levels")]
    TooDeep { limit: usize },

    /// An identifier that is neither a fact nor a threshold.
    #[error("unknown variable \"{0}\"")]
    UnknownVariable(String),

    /// Operand kinds the operator cannot compare.
    #[error("cannot apply '{op}' to {left} and {right}")]
    TypeMismatch {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },
}

impl ExprError {
    /// Whether this error was raised while parsing rather than evaluating.
    pub fn is_syntax(&self) -> bool {
        !matches!(self, Self::UnknownVariable(_) | Self::TypeMismatch { .. })
    }
}
