//! # Error Hierarchy
//!
//! Structured errors for the foundational types, built with `thiserror`.
//! Each variant carries the offending input so operators can fix a broken
//! rule repository without guesswork.

use thiserror::Error;

/// Errors raised while constructing core types from configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The precedence list has no entries.
    #[error("precedence table must list at least one severity level")]
    EmptyPrecedence,

    /// A severity tag is empty or whitespace.
    #[error("severity level at position {position} is blank")]
    BlankLevel {
        /// Zero-based position in the precedence list.
        position: usize,
    },

    /// The same severity tag appears twice in the precedence list.
    #[error("severity level \"{level}\" appears more than once in the precedence table")]
    DuplicateLevel {
        /// The repeated tag.
        level: String,
    },

    /// A severity tag is not part of the configured precedence table.
    #[error("unknown severity level \"{level}\" (expected one of: {known})")]
    UnknownLevel {
        /// The tag that failed to resolve.
        level: String,
        /// Comma-separated list of configured tags.
        known: String,
    },
}
