//! Name resolution for rule and constraint conditions.

use std::collections::BTreeMap;

use prisk_core::{FactBase, FactValue};
use prisk_expr::Context;
use prisk_rules::ThresholdTable;

/// Facts, thresholds, and (for constraints) the intermediate decision.
///
/// Lookup order: intermediate state, then facts, then thresholds. A fact
/// named like a threshold shadows it.
pub struct EvalContext<'a> {
    facts: &'a FactBase,
    thresholds: &'a ThresholdTable,
    state: BTreeMap<&'static str, FactValue>,
}

impl<'a> EvalContext<'a> {
    /// Context for rule conditions.
    pub fn new(facts: &'a FactBase, thresholds: &'a ThresholdTable) -> Self {
        Self {
            facts,
            thresholds,
            state: BTreeMap::new(),
        }
    }

    /// Add an intermediate value visible to conditions.
    pub fn with(mut self, name: &'static str, value: FactValue) -> Self {
        self.state.insert(name, value);
        self
    }
}

impl Context for EvalContext<'_> {
    fn lookup(&self, name: &str) -> Option<FactValue> {
        self.state
            .get(name)
            .cloned()
            .or_else(|| self.facts.get(name).cloned())
            .or_else(|| self.thresholds.fact(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_order() {
        let facts: FactBase = [("ppl", FactValue::Int(5)), ("ppl_mid", FactValue::Int(1))]
            .into_iter()
            .collect();
        let thresholds = ThresholdTable::default();
        let ctx = EvalContext::new(&facts, &thresholds).with("ppl", FactValue::Int(9));

        assert_eq!(ctx.lookup("ppl"), Some(FactValue::Int(9)));
        assert_eq!(ctx.lookup("ppl_mid"), Some(FactValue::Int(1)));
        assert_eq!(ctx.lookup("biometric_high"), Some(FactValue::Int(100_000)));
        assert_eq!(ctx.lookup("nothing"), None);
    }
}
