//! # Coupling Resolver
//!
//! Fixed one-way implications between obligations, applied once, in this
//! order:
//!
//! ```text
//! (a) (transfer or directmail_biz) and ppl >= ppl_mid   => reg
//! (b) report                                            => dpo
//! (c) reg                                               => dpo
//! (d) sensitive_people >= sensitive_dpo                 => dpo
//! (e) large_scale_monitoring                            => dpo
//! (f) not reg and (biometric_100k
//!                  or sensitive_people >= sensitive_report) => report
//! ```
//!
//! This is a single pass, not a fixpoint. (f) can only fire when (d) has
//! already fired: the rule loader rejects thresholds where
//! `sensitive_report` or `biometric_high` is below `sensitive_dpo`, and
//! the deriver floors `sensitive_people` at `biometric_high` whenever
//! `biometric_100k` is set. So `report => dpo` holds without a second
//! pass.

use prisk_core::fields::{
    BIOMETRIC_100K, DIRECTMAIL_BIZ, LARGE_SCALE_MONITORING, PPL, SENSITIVE_PEOPLE, TRANSFER,
};
use prisk_core::{FactBase, FactValue};
use prisk_rules::ThresholdTable;

/// Final obligation flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Obligations {
    pub dpo: bool,
    pub reg: bool,
    pub report: bool,
}

/// Apply the coupling implications.
pub fn resolve_couplings(
    mut ob: Obligations,
    facts: &FactBase,
    thresholds: &ThresholdTable,
) -> Obligations {
    let count = |name: &str| facts.get(name).and_then(FactValue::as_number).unwrap_or(0.0);
    let sensitive_people = count(SENSITIVE_PEOPLE);

    if (facts.flag(TRANSFER) || facts.flag(DIRECTMAIL_BIZ)) && count(PPL) >= thresholds.ppl_mid() {
        ob.reg = true;
    }
    if ob.report {
        ob.dpo = true;
    }
    if ob.reg {
        ob.dpo = true;
    }
    if sensitive_people >= thresholds.sensitive_dpo() {
        ob.dpo = true;
    }
    if facts.flag(LARGE_SCALE_MONITORING) {
        ob.dpo = true;
    }
    if !ob.reg
        && (facts.flag(BIOMETRIC_100K) || sensitive_people >= thresholds.sensitive_report())
    {
        ob.report = true;
    }
    ob
}
