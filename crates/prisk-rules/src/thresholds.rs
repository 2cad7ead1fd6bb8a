//! # Threshold Table
//!
//! Named numeric boundaries used by conditions and by the engine's fixed
//! logic. The engine reads five of them by name; for those, a built-in
//! default applies when the rule document does not set a value. Any other
//! name is available to conditions only if the document defines it.

use std::collections::BTreeMap;

use prisk_core::FactValue;
use serde::Serialize;

use crate::error::RuleLoadError;

/// Population at which the middle tier and registration obligations start.
pub const PPL_MID: &str = "ppl_mid";
/// Largest access-holder count still eligible for the basic tier.
pub const ACCESS_BASIC_MAX: &str = "access_basic_max";
/// Population floor implied by large-scale biometric identification.
pub const BIOMETRIC_HIGH: &str = "biometric_high";
/// Sensitive population that requires a data protection officer.
pub const SENSITIVE_DPO: &str = "sensitive_dpo";
/// Sensitive population that requires reporting to the regulator.
pub const SENSITIVE_REPORT: &str = "sensitive_report";

const BUILTIN: &[(&str, f64)] = &[
    (PPL_MID, 10_000.0),
    (ACCESS_BASIC_MAX, 10.0),
    (BIOMETRIC_HIGH, 100_000.0),
    (SENSITIVE_DPO, 10_000.0),
    (SENSITIVE_REPORT, 100_000.0),
];

/// Read-only name → number map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ThresholdTable {
    values: BTreeMap<String, f64>,
}

impl ThresholdTable {
    /// Build a table from configured values, filling built-in defaults.
    ///
    /// # Errors
    ///
    /// Rejects non-finite values and threshold combinations under which
    /// the coupling pass could set `report` without `dpo`.
    pub fn new(configured: BTreeMap<String, f64>) -> Result<Self, RuleLoadError> {
        if let Some((name, value)) = configured.iter().find(|(_, v)| !v.is_finite()) {
            return Err(RuleLoadError::NonFiniteThreshold {
                name: name.clone(),
                value: *value,
            });
        }

        let mut values = configured;
        for (name, value) in BUILTIN {
            values.entry((*name).to_string()).or_insert(*value);
        }
        let table = Self { values };

        let dpo = table.number(SENSITIVE_DPO);
        for floor in [SENSITIVE_REPORT, BIOMETRIC_HIGH] {
            if table.number(floor) < dpo {
                return Err(RuleLoadError::InconsistentThresholds {
                    detail: format!(
                        "{floor} ({}) must not be below {SENSITIVE_DPO} ({dpo})",
                        table.number(floor)
                    ),
                });
            }
        }
        Ok(table)
    }

    /// Look up a threshold by name.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Value of one of the built-in thresholds.
    fn number(&self, name: &str) -> f64 {
        self.get(name).unwrap_or(0.0)
    }

    /// Threshold as a fact value for condition evaluation. Integral values
    /// become integers so they print and compare like counts.
    pub fn fact(&self, name: &str) -> Option<FactValue> {
        self.get(name).map(|v| {
            if v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
                FactValue::Int(v as i64)
            } else {
                FactValue::Float(v)
            }
        })
    }

    /// `ppl_mid`.
    pub fn ppl_mid(&self) -> f64 {
        self.number(PPL_MID)
    }

    /// `access_basic_max`.
    pub fn access_basic_max(&self) -> f64 {
        self.number(ACCESS_BASIC_MAX)
    }

    /// `biometric_high`.
    pub fn biometric_high(&self) -> f64 {
        self.number(BIOMETRIC_HIGH)
    }

    /// `sensitive_dpo`.
    pub fn sensitive_dpo(&self) -> f64 {
        self.number(SENSITIVE_DPO)
    }

    /// `sensitive_report`.
    pub fn sensitive_report(&self) -> f64 {
        self.number(SENSITIVE_REPORT)
    }

    /// Iterate thresholds in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self {
            values: BUILTIN.iter().map(|(k, v)| ((*k).to_string(), *v)).collect(),
        }
    }
}
