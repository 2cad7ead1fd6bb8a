//! # Severity Precedence
//!
//! The rule repository ships an ordered list of severity tags, most
//! severe first (e.g. `high, mid, basic, lone`). That list is the only
//! source of truth for which tags exist and how they rank.
//!
//! ## Invariant
//!
//! A [`Severity`] is only ever produced by [`PrecedenceTable::resolve`],
//! so every severity the engine handles is a member of the table it was
//! resolved against. Comparison helpers take the table explicitly rather
//! than implementing `Ord` on the tag, because the order is data.

use std::fmt;

use serde::Serialize;

use crate::error::CoreError;

/// A severity tag known to be a member of a [`PrecedenceTable`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Severity(String);

impl Severity {
    /// The tag as configured.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Total order over severity tags, most severe first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PrecedenceTable {
    levels: Vec<String>,
}

impl PrecedenceTable {
    /// Build a table from the configured list, most severe first.
    ///
    /// # Errors
    ///
    /// Rejects an empty list, blank tags and duplicates.
    pub fn new<I, S>(levels: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for (position, level) in levels.into_iter().enumerate() {
            let level = level.into();
            if level.trim().is_empty() {
                return Err(CoreError::BlankLevel { position });
            }
            if out.contains(&level) {
                return Err(CoreError::DuplicateLevel { level });
            }
            out.push(level);
        }
        if out.is_empty() {
            return Err(CoreError::EmptyPrecedence);
        }
        Ok(Self { levels: out })
    }

    /// Resolve a tag against the table.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::UnknownLevel`] if the tag is not configured.
    pub fn resolve(&self, tag: &str) -> Result<Severity, CoreError> {
        if self.levels.iter().any(|l| l == tag) {
            Ok(Severity(tag.to_string()))
        } else {
            Err(CoreError::UnknownLevel {
                level: tag.to_string(),
                known: self.levels.join(", "),
            })
        }
    }

    /// Whether a tag is configured.
    pub fn contains(&self, tag: &str) -> bool {
        self.levels.iter().any(|l| l == tag)
    }

    /// Rank of a tag: 0 is the most severe.
    ///
    /// Resolved severities always have a rank; a severity resolved against
    /// a different table ranks below everything in this one.
    pub fn rank(&self, level: &Severity) -> usize {
        self.levels
            .iter()
            .position(|l| *l == level.0)
            .unwrap_or(self.levels.len())
    }

    /// Whether `candidate` is strictly more severe than `current`.
    pub fn is_more_severe(&self, candidate: &Severity, current: &Severity) -> bool {
        self.rank(candidate) < self.rank(current)
    }

    /// Raise `level` to at least `floor`. Never lowers it.
    pub fn at_least(&self, level: Severity, floor: &Severity) -> Severity {
        if self.is_more_severe(floor, &level) {
            floor.clone()
        } else {
            level
        }
    }

    /// The most severe tier.
    pub fn most_severe(&self) -> Severity {
        Severity(self.levels[0].clone())
    }

    /// The least severe tier.
    pub fn least_severe(&self) -> Severity {
        Severity(self.levels[self.levels.len() - 1].clone())
    }

    /// Configured tags, most severe first.
    pub fn levels(&self) -> &[String] {
        &self.levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> PrecedenceTable {
        PrecedenceTable::new(["high", "mid", "basic", "lone"]).unwrap()
    }

    #[test]
    fn rejects_empty_blank_and_duplicates() {
        assert_eq!(
            PrecedenceTable::new(Vec::<String>::new()),
            Err(CoreError::EmptyPrecedence)
        );
        assert_eq!(
            PrecedenceTable::new(["high", " "]),
            Err(CoreError::BlankLevel { position: 1 })
        );
        assert!(matches!(
            PrecedenceTable::new(["high", "mid", "high"]),
            Err(CoreError::DuplicateLevel { .. })
        ));
    }

    #[test]
    fn resolve_only_configured_tags() {
        let t = table();
        assert_eq!(t.resolve("mid").unwrap().as_str(), "mid");
        assert!(matches!(t.resolve("extreme"), Err(CoreError::UnknownLevel { .. })));
    }

    #[test]
    fn severity_comparison_follows_table_order() {
        let t = table();
        let high = t.resolve("high").unwrap();
        let basic = t.resolve("basic").unwrap();
        assert!(t.is_more_severe(&high, &basic));
        assert!(!t.is_more_severe(&basic, &high));
        assert!(!t.is_more_severe(&high, &high));
    }

    #[test]
    fn at_least_never_lowers() {
        let t = table();
        let mid = t.resolve("mid").unwrap();
        let lone = t.resolve("lone").unwrap();
        assert_eq!(t.at_least(lone.clone(), &mid), mid);
        assert_eq!(t.at_least(mid.clone(), &lone), mid);
    }

    #[test]
    fn extremes() {
        let t = table();
        assert_eq!(t.most_severe().as_str(), "high");
        assert_eq!(t.least_severe().as_str(), "lone");
    }
}
