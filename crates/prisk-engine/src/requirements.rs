//! # Requirement Deriver
//!
//! Maps individual facts to the compliance documents they call for,
//! independently of the severity level. Tags appear at most once, in the
//! order they were first triggered.

use prisk_core::fields::{
    CAMERAS, DIRECTMAIL_BIZ, DIRECTMAIL_SELF, EMPLOYEES_EXPOSED, PROCESSOR, PROCESSOR_LARGE_ORG,
    PROCESSOR_SENSITIVE_ORG,
};
use prisk_core::FactBase;

/// Confidentiality agreement for employees with access to the data.
pub const WORKER_SECURITY_AGREEMENT: &str = "worker_security_agreement";
/// Policy for security camera use.
pub const CAMERAS_POLICY: &str = "cameras_policy";
/// Contract text for outsourced processing.
pub const OUTSOURCING_TEXT: &str = "outsourcing_text";
/// Consultation before taking on processing for others.
pub const CONSULTATION_CALL: &str = "consultation_call";
/// Rules for direct marketing.
pub const DIRECT_MARKETING_RULES: &str = "direct_marketing_rules";

/// Requirement tags triggered by the facts.
pub fn derive_requirements(facts: &FactBase) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut add = |tag: &str| {
        if !out.iter().any(|t| t == tag) {
            out.push(tag.to_string());
        }
    };

    if facts.flag(EMPLOYEES_EXPOSED) {
        add(WORKER_SECURITY_AGREEMENT);
    }
    if facts.flag(CAMERAS) {
        add(CAMERAS_POLICY);
    }
    if facts.flag(PROCESSOR) {
        add(OUTSOURCING_TEXT);
        if !facts.flag(PROCESSOR_SENSITIVE_ORG) {
            add(CONSULTATION_CALL);
        }
    }
    if facts.flag(PROCESSOR_SENSITIVE_ORG) || facts.flag(PROCESSOR_LARGE_ORG) {
        add(OUTSOURCING_TEXT);
    }
    if facts.flag(DIRECTMAIL_BIZ) || facts.flag(DIRECTMAIL_SELF) {
        add(DIRECT_MARKETING_RULES);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use prisk_core::FactValue;

    fn flags(names: &[&str]) -> FactBase {
        names.iter().map(|n| (*n, FactValue::Bool(true))).collect()
    }

    #[test]
    fn employees_then_cameras() {
        assert_eq!(
            derive_requirements(&flags(&[CAMERAS, EMPLOYEES_EXPOSED])),
            vec![WORKER_SECURITY_AGREEMENT, CAMERAS_POLICY]
        );
    }

    #[test]
    fn processor_needs_consultation_unless_sensitive_org() {
        assert_eq!(
            derive_requirements(&flags(&[PROCESSOR])),
            vec![OUTSOURCING_TEXT, CONSULTATION_CALL]
        );
        assert_eq!(
            derive_requirements(&flags(&[PROCESSOR, PROCESSOR_SENSITIVE_ORG])),
            vec![OUTSOURCING_TEXT]
        );
    }

    #[test]
    fn outsourcing_text_is_not_duplicated() {
        let reqs =
            derive_requirements(&flags(&[PROCESSOR, PROCESSOR_LARGE_ORG, PROCESSOR_SENSITIVE_ORG]));
        assert_eq!(reqs, vec![OUTSOURCING_TEXT]);
    }

    #[test]
    fn either_direct_mail_flag() {
        assert_eq!(derive_requirements(&flags(&[DIRECTMAIL_SELF])), vec![DIRECT_MARKETING_RULES]);
        assert_eq!(
            derive_requirements(&flags(&[DIRECTMAIL_BIZ, DIRECTMAIL_SELF])),
            vec![DIRECT_MARKETING_RULES]
        );
    }

    #[test]
    fn nothing_triggered() {
        assert!(derive_requirements(&FactBase::new()).is_empty());
    }
}
