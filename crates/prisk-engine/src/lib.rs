//! # prisk-engine — Risk Classification Pipeline
//!
//! Turns one questionnaire submission into a [`ClassificationResult`]
//! using a compiled [`RuleSet`](prisk_rules::RuleSet):
//!
//! - [`derive`]: implied facts and monotonic count floors.
//! - [`matcher`]: rule scan with highest-severity-wins for `level`.
//! - [`fallback`]: explicit default tiering when no rule set a level.
//! - [`constraints`]: post-scan floors and forced `dpo`.
//! - [`requirements`]: compliance documents triggered by facts.
//! - [`coupling`]: `report => dpo`, `reg => dpo` and related implications.
//!
//! ## Failure Policy
//!
//! Classification cannot fail. A condition that does not evaluate is
//! logged with `tracing::warn!`, recorded in the [`EvaluationTrace`], and
//! counts as not satisfied. The result always carries a level from the
//! precedence table.
//!
//! ## Guarantees
//!
//! - `report => dpo` and `reg => dpo` in every result.
//! - The level is never below a `level_min` from a matching rule or a
//!   satisfied constraint.
//! - Derived counts never fall below the submitted ones.

pub mod classify;
pub mod constraints;
pub mod context;
pub mod coupling;
pub mod derive;
pub mod fallback;
pub mod matcher;
pub mod requirements;
pub mod trace;

pub use classify::{classify, classify_traced, ClassificationResult};
pub use context::EvalContext;
pub use coupling::Obligations;
pub use derive::derive;
pub use matcher::Decision;
pub use requirements::derive_requirements;
pub use trace::{Diagnostic, EvaluationTrace, Stage};
