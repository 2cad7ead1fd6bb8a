//! # Fallback Classifier
//!
//! Decides the level when no rule proposed one. The policy is explicit
//! so an incomplete rule set degrades predictably:
//!
//! ```text
//! basic  if  not ethics and not transfer and not directmail_biz
//!            and not sensitive and ppl < ppl_mid
//!            and access <= access_basic_max and owners <= access_basic_max
//! else   the accumulated level_min, or mid when there is none
//! ```

use prisk_core::fields::{ACCESS, DIRECTMAIL_BIZ, ETHICS, OWNERS, PPL, SENSITIVE, TRANSFER};
use prisk_core::{FactBase, FactValue, Severity};
use prisk_rules::RuleSet;

/// Whether the submission sits inside the basic-tier boundary.
pub fn within_basic_boundary(facts: &FactBase, rules: &RuleSet) -> bool {
    let thresholds = &rules.thresholds;
    let count = |name: &str| facts.get(name).and_then(FactValue::as_number).unwrap_or(0.0);

    ![ETHICS, TRANSFER, DIRECTMAIL_BIZ, SENSITIVE]
        .iter()
        .any(|name| facts.flag(name))
        && count(PPL) < thresholds.ppl_mid()
        && count(ACCESS) <= thresholds.access_basic_max()
        && count(OWNERS) <= thresholds.access_basic_max()
}

/// The fallback level.
pub fn fallback_level(facts: &FactBase, rules: &RuleSet, level_min: Option<&Severity>) -> Severity {
    if within_basic_boundary(facts, rules) {
        rules.fallback.basic.clone()
    } else {
        level_min.cloned().unwrap_or_else(|| rules.fallback.mid.clone())
    }
}
