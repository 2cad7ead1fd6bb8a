//! # API Route Modules
//!
//! - [`classify`]: questionnaire classification, with and without trace.
//! - [`rules`]: rule snapshot metadata and reload.

pub mod classify;
pub mod rules;
