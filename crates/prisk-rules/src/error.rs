//! Rule repository errors.
//!
//! Every variant is fatal for the load it came from: the caller must not
//! classify with a partially loaded rule set. Variants carry the file path
//! or rule location so a broken deploy can be fixed from the log line.

use std::path::PathBuf;

use thiserror::Error;

use prisk_core::CoreError;

/// Errors that abort loading a rule document.
#[derive(Debug, Error)]
pub enum RuleLoadError {
    /// The rule file does not exist.
    #[error("rule file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// The rule file could not be read.
    #[error("failed to read rule file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A reload was requested on a store that was not opened from a file.
    #[error("rule store has no source file to reload from")]
    NoSource,

    /// JSON parsing failed.
    #[error("failed to parse rule JSON{}: {source}", at_path(.path))]
    JsonParse {
        path: Option<PathBuf>,
        source: serde_json::Error,
    },

    /// YAML parsing failed.
    #[error("failed to parse rule YAML{}: {source}", at_path(.path))]
    YamlParse {
        path: Option<PathBuf>,
        source: serde_yaml::Error,
    },

    /// The precedence table is malformed.
    #[error("invalid precedence table: {0}")]
    Precedence(#[source] CoreError),

    /// The precedence table lacks a tier the fallback classifier needs.
    #[error("precedence table must include the \"{tier}\" tier used by the fallback classifier")]
    MissingFallbackTier { tier: &'static str },

    /// A rule or constraint names a severity outside the precedence table.
    #[error("{location}: {source}")]
    UnknownLevel {
        location: String,
        #[source]
        source: CoreError,
    },

    /// A threshold is NaN or infinite.
    #[error("threshold \"{name}\" must be a finite number, got {value}")]
    NonFiniteThreshold { name: String, value: f64 },

    /// Thresholds that would let coupling break `report => dpo`.
    #[error("inconsistent thresholds: {detail}")]
    InconsistentThresholds { detail: String },
}

fn at_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => format!(" at {}", p.display()),
        None => String::new(),
    }
}
