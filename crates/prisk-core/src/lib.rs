#![deny(missing_docs)]

//! # prisk-core — Foundational Types for the Privacy Risk Classifier
//!
//! Every other crate in the workspace depends on this one. It has no
//! internal crate dependencies, only `serde`, `serde_json`, `thiserror`
//! and `tracing` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **[`FactValue`] is the only value shape the engine reasons over.**
//!    Raw questionnaire answers are coerced into it exactly once, by
//!    [`normalize_answers`], and never re-parsed downstream.
//!
//! 2. **[`FactBase`] is built, then frozen.** There is no `insert` on a
//!    fact base. Derivation produces a new one from a copy of the old map.
//!
//! 3. **Severity tags are data, not an enum.** The set of tiers comes from
//!    the rule repository. A [`Severity`] can only be obtained from a
//!    [`PrecedenceTable`], so every tag in flight is a member of the
//!    configured order.
//!
//! 4. **[`CoreError`] hierarchy.** Structured errors with `thiserror`, no
//!    `.unwrap()` outside tests.

pub mod error;
pub mod facts;
pub mod fields;
pub mod normalize;
pub mod severity;
pub mod value;

pub use error::CoreError;
pub use facts::FactBase;
pub use normalize::{normalize_answers, normalize_str, normalize_value};
pub use severity::{PrecedenceTable, Severity};
pub use value::FactValue;
