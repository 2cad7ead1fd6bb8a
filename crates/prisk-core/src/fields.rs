//! # Designated Fact Names
//!
//! Field names read by the fixed-logic stages of the classifier
//! (derivation, fallback, requirements, coupling). Rules and constraints
//! may reference any field; these are the ones the engine itself knows.

use crate::value::FactValue;

/// Sensitive data is held (may also be derived).
pub const SENSITIVE: &str = "sensitive";
/// Categories of sensitive data held (multi-select).
pub const SENSITIVE_TYPES: &str = "sensitive_types";
/// Number of people whose sensitive data is held.
pub const SENSITIVE_PEOPLE: &str = "sensitive_people";
/// Total number of data subjects.
pub const PPL: &str = "ppl";
/// Biometric identification of at least the `biometric_high` population.
pub const BIOMETRIC_100K: &str = "biometric_100k";
/// Number of people whose biometric data is held.
pub const BIOMETRIC_PEOPLE: &str = "biometric_people";
/// Data is held under a professional confidentiality duty.
pub const ETHICS: &str = "ethics";
/// Number of database owners.
pub const OWNERS: &str = "owners";
/// Number of people with access rights.
pub const ACCESS: &str = "access";
/// Data is transferred to third parties for consideration.
pub const TRANSFER: &str = "transfer";
/// Direct marketing on behalf of others.
pub const DIRECTMAIL_BIZ: &str = "directmail_biz";
/// Direct marketing of the organisation's own services.
pub const DIRECTMAIL_SELF: &str = "directmail_self";
/// Systematic monitoring of people at large scale.
pub const LARGE_SCALE_MONITORING: &str = "large_scale_monitoring";
/// Employees are exposed to personal data.
pub const EMPLOYEES_EXPOSED: &str = "employees_exposed";
/// Security cameras are in use.
pub const CAMERAS: &str = "cameras";
/// The organisation processes data on behalf of others.
pub const PROCESSOR: &str = "processor";
/// Processing on behalf of a sensitive or public body.
pub const PROCESSOR_SENSITIVE_ORG: &str = "processor_sensitive_org";
/// Processing on behalf of a large organisation.
pub const PROCESSOR_LARGE_ORG: &str = "processor_large_org";

/// Boolean fields filled with `false` when the submission omits them.
pub const FLAG_FIELDS: &[&str] = &[
    SENSITIVE,
    BIOMETRIC_100K,
    ETHICS,
    TRANSFER,
    DIRECTMAIL_BIZ,
    DIRECTMAIL_SELF,
    LARGE_SCALE_MONITORING,
    EMPLOYEES_EXPOSED,
    CAMERAS,
    PROCESSOR,
    PROCESSOR_SENSITIVE_ORG,
    PROCESSOR_LARGE_ORG,
];

/// Count fields filled with `0` when the submission omits them.
pub const COUNT_FIELDS: &[&str] = &[SENSITIVE_PEOPLE, PPL, BIOMETRIC_PEOPLE, OWNERS, ACCESS];

/// List fields filled with `[]` when the submission omits them.
pub const LIST_FIELDS: &[&str] = &[SENSITIVE_TYPES];

/// Neutral value for a designated field, or `None` if the name is not one.
pub fn neutral_value(name: &str) -> Option<FactValue> {
    if FLAG_FIELDS.contains(&name) {
        Some(FactValue::Bool(false))
    } else if COUNT_FIELDS.contains(&name) {
        Some(FactValue::Int(0))
    } else if LIST_FIELDS.contains(&name) {
        Some(FactValue::List(Vec::new()))
    } else {
        None
    }
}

/// Every designated field, in declaration order.
pub fn designated() -> impl Iterator<Item = &'static str> {
    FLAG_FIELDS
        .iter()
        .chain(COUNT_FIELDS)
        .chain(LIST_FIELDS)
        .copied()
}
