//! # Fact Base
//!
//! The per-request map from field name to [`FactValue`]. A fact base is
//! created for one classification call and dropped at the end of it; it
//! is never shared between requests.
//!
//! There is deliberately no way to mutate a `FactBase` in place. Stages
//! that widen the facts (derivation) take the map out with
//! [`FactBase::to_map`], edit the copy, and build a new base from it.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::value::FactValue;

/// An immutable, ordered set of named facts.
///
/// Backed by a `BTreeMap` so iteration (and therefore serialization and
/// any diagnostics derived from it) is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FactBase {
    facts: BTreeMap<String, FactValue>,
}

impl FactBase {
    /// An empty fact base.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a fact by name.
    pub fn get(&self, name: &str) -> Option<&FactValue> {
        self.facts.get(name)
    }

    /// Whether a fact is present (a present `Null` counts as present).
    pub fn contains(&self, name: &str) -> bool {
        self.facts.contains_key(name)
    }

    /// Truthiness of a fact; absent facts are false.
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).is_some_and(FactValue::is_truthy)
    }

    /// Numeric reading of a fact; absent or non-numeric facts read as 0.
    pub fn count(&self, name: &str) -> i64 {
        self.get(name).and_then(FactValue::as_count).unwrap_or(0)
    }

    /// Iterate facts in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FactValue)> {
        self.facts.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of facts.
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Whether the fact base is empty.
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Copy the underlying map, for building a derived fact base.
    pub fn to_map(&self) -> BTreeMap<String, FactValue> {
        self.facts.clone()
    }
}

impl From<BTreeMap<String, FactValue>> for FactBase {
    fn from(facts: BTreeMap<String, FactValue>) -> Self {
        Self { facts }
    }
}

impl<K: Into<String>> FromIterator<(K, FactValue)> for FactBase {
    fn from_iter<I: IntoIterator<Item = (K, FactValue)>>(iter: I) -> Self {
        Self {
            facts: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
