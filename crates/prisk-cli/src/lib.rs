//! # prisk-cli — Command-Line Tool for the Privacy Risk Classifier
//!
//! ## Subcommands
//!
//! - `prisk classify` — classify one submission, print the JSON result.
//! - `prisk check` — load a rule file and report invalid conditions.
//!
//! ```bash
//! prisk classify --rules config/security_rules.json --answers '{"owners": 1, "ppl": 500}'
//! prisk classify --answers answers.json --explain --pretty
//! prisk check --rules config/security_rules.json
//! ```
//!
//! Logs go to stderr; stdout carries only the command's output.

pub mod check;
pub mod classify;

/// Rule file used when `--rules` is not given.
pub const DEFAULT_RULES_PATH: &str = "config/security_rules.json";
