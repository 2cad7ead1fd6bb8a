//! # prisk-rules — Rule Repository
//!
//! The classification rules are configuration, not code. This crate turns
//! a rule document (JSON, or YAML for hand-edited files) into a validated,
//! compiled [`RuleSet`], and publishes it through a [`RuleStore`] that
//! readers share without locks held across a classification.
//!
//! ## Document Shape
//!
//! ```json
//! {
//!   "precedence": ["high", "mid", "basic", "lone"],
//!   "thresholds": { "ppl_mid": 10000, "access_basic_max": 10 },
//!   "rules": [ { "when": "ppl >= ppl_mid", "set": { "level": "mid" } } ],
//!   "constraints": [ { "if": "sensitive", "enforce": { "level_min": "mid" } } ],
//!   "defaults": { "owners": 1 }
//! }
//! ```
//!
//! ## Failure Policy
//!
//! - A missing or unparseable document, or one that names a severity the
//!   precedence table does not list, is fatal ([`RuleLoadError`]). The
//!   store keeps serving the previous snapshot.
//! - A condition string that does not parse is NOT fatal. It compiles to
//!   an invalid condition that never matches and is reported every time
//!   it is evaluated.

pub mod document;
pub mod error;
pub mod loader;
pub mod ruleset;
pub mod store;
pub mod thresholds;

pub use document::RuleDocument;
pub use error::RuleLoadError;
pub use loader::{load_path, load_str, source_digest, LoadedRuleSet, SourceFormat};
pub use ruleset::{
    CompiledCondition, Constraint, Effect, Enforcement, FallbackTiers, Rule, RuleSet,
    DECISION_FIELDS, FALLBACK_TIERS,
};
pub use store::{RuleSnapshot, RuleStore};
pub use thresholds::ThresholdTable;
