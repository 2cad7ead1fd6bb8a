//! # Fact Deriver
//!
//! Widens a normalized fact base with the facts the questionnaire implies
//! but does not ask for directly.
//!
//! 1. Every designated field the submission left out (or sent as `null`)
//!    gets its neutral value.
//! 2. `biometric_100k` floors `biometric_people`, `sensitive_people` and
//!    `ppl` at the `biometric_high` threshold.
//! 3. `ppl` is floored at `sensitive_people`.
//! 4. `sensitive` is set when sensitive categories or a sensitive
//!    population are present.
//!
//! ## Invariant
//!
//! Floors only raise. A value the caller supplied that is already above
//! the floor is kept as-is, and numeric fields never decrease.

use std::collections::BTreeMap;

use prisk_core::fields::{
    self, BIOMETRIC_100K, BIOMETRIC_PEOPLE, PPL, SENSITIVE, SENSITIVE_PEOPLE, SENSITIVE_TYPES,
};
use prisk_core::{FactBase, FactValue};
use prisk_rules::ThresholdTable;

/// Build the derived fact base. The input is left untouched.
pub fn derive(facts: &FactBase, thresholds: &ThresholdTable) -> FactBase {
    let mut map = facts.to_map();

    for name in fields::designated() {
        let missing = matches!(map.get(name), None | Some(FactValue::Null));
        if missing {
            if let Some(neutral) = fields::neutral_value(name) {
                map.insert(name.to_string(), neutral);
            }
        }
    }

    if truthy(&map, BIOMETRIC_100K) {
        let floor = thresholds.biometric_high();
        for name in [BIOMETRIC_PEOPLE, SENSITIVE_PEOPLE, PPL] {
            raise_to(&mut map, name, floor);
        }
    }

    if let Some(sensitive_people) = number(&map, SENSITIVE_PEOPLE) {
        raise_to(&mut map, PPL, sensitive_people);
    }

    let sensitive = truthy(&map, SENSITIVE)
        || truthy(&map, SENSITIVE_TYPES)
        || number(&map, SENSITIVE_PEOPLE).is_some_and(|n| n > 0.0);
    map.insert(SENSITIVE.to_string(), FactValue::Bool(sensitive));

    FactBase::from(map)
}

fn truthy(map: &BTreeMap<String, FactValue>, name: &str) -> bool {
    map.get(name).is_some_and(FactValue::is_truthy)
}

fn number(map: &BTreeMap<String, FactValue>, name: &str) -> Option<f64> {
    map.get(name).and_then(FactValue::as_number)
}

/// Raise a numeric fact to `floor`. Non-numeric values are replaced only
/// when the floor is positive.
fn raise_to(map: &mut BTreeMap<String, FactValue>, name: &str, floor: f64) {
    let below = match number(map, name) {
        Some(current) => current < floor,
        None => floor > 0.0,
    };
    if below {
        map.insert(name.to_string(), floor_value(floor));
    }
}

fn floor_value(floor: f64) -> FactValue {
    if floor.fract() == 0.0 && floor.abs() < i64::MAX as f64 {
        FactValue::Int(floor as i64)
    } else {
        FactValue::Float(floor)
    }
}
