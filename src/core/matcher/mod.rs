//! Name matching between canonical and reference records
//!
//! The two sources name the same entity differently often enough ("Darth
//! Vader" vs "Vader", "Anakin Skywalker" vs "Luke Skywalker's father")
//! that equality alone misses most pairs. [`find_match`] tries three
//! strategies in order and returns the first candidate that satisfies one:
//!
//! 1. **Exact**: names equal, ignoring case
//! 2. **Substring**: either name contains the other, ignoring case
//! 3. **Alias**: an [`AliasTable`] rule applies to the name and a candidate
//!    carries one of its target tokens
//!
//! Ties resolve to the earliest candidate.
//!
//! # Example
//!
//! ```rust
//! use holonet::core::matcher::{find_match, AliasTable};
//! use holonet::domain::{MatchStrategy, Named};
//!
//! struct Entry(&'static str);
//! impl Named for Entry {
//!     fn name(&self) -> &str { self.0 }
//! }
//!
//! let candidates = [Entry("Luke Skywalker"), Entry("Darth Vader")];
//! let hit = find_match("vader", &candidates, &AliasTable::default()).unwrap();
//! assert_eq!(hit.record.name(), "Darth Vader");
//! assert_eq!(hit.strategy, MatchStrategy::Substring);
//! ```

use crate::config::{AliasRule, EnrichmentConfig};
use crate::domain::{MatchStrategy, Named};

/// A chosen candidate and the strategy that chose it
#[derive(Debug, PartialEq)]
pub struct Match<'a, T> {
    pub record: &'a T,
    pub strategy: MatchStrategy,
}

// Manual impls: derives would require `T: Clone`/`T: Copy`.
impl<T> Clone for Match<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Match<'_, T> {}

/// Lowercased alias rule ready for matching
#[derive(Debug, Clone, PartialEq, Eq)]
struct NormalizedRule {
    token: String,
    targets: Vec<String>,
}

/// Ordered alias rules consulted after exact and substring matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTable {
    rules: Vec<NormalizedRule>,
}

impl AliasTable {
    /// Builds a table, normalizing tokens to lowercase
    ///
    /// Rules with a blank token are dropped. A rule without targets targets
    /// its own token.
    pub fn new<'r>(rules: impl IntoIterator<Item = &'r AliasRule>) -> Self {
        let rules = rules
            .into_iter()
            .filter_map(|rule| {
                let token = rule.token.trim().to_lowercase();
                if token.is_empty() {
                    return None;
                }

                let mut targets: Vec<String> = rule
                    .targets
                    .iter()
                    .map(|t| t.trim().to_lowercase())
                    .filter(|t| !t.is_empty())
                    .collect();
                if targets.is_empty() {
                    targets.push(token.clone());
                }

                Some(NormalizedRule { token, targets })
            })
            .collect();

        Self { rules }
    }

    /// A table with no rules
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table has no rules
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    fn find<'a, T: Named>(&self, name: &str, candidates: &'a [T]) -> Option<&'a T> {
        self.rules
            .iter()
            .filter(|rule| name.contains(rule.token.as_str()))
            .find_map(|rule| {
                candidates.iter().find(|candidate| {
                    let candidate = candidate.name().to_lowercase();
                    rule.targets
                        .iter()
                        .any(|target| candidate.contains(target.as_str()))
                })
            })
    }
}

impl Default for AliasTable {
    /// The `vader` and `skywalker` rules
    fn default() -> Self {
        Self::new(&EnrichmentConfig::default().aliases)
    }
}

/// Picks the candidate that best matches `name`
///
/// A blank `name` never matches.
pub fn find_match<'a, T: Named>(
    name: &str,
    candidates: &'a [T],
    aliases: &AliasTable,
) -> Option<Match<'a, T>> {
    let needle = name.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    let lowered: Vec<String> = candidates
        .iter()
        .map(|candidate| candidate.name().trim().to_lowercase())
        .collect();

    if let Some(index) = lowered.iter().position(|candidate| *candidate == needle) {
        return Some(Match {
            record: &candidates[index],
            strategy: MatchStrategy::Exact,
        });
    }

    if let Some(index) = lowered.iter().position(|candidate| {
        !candidate.is_empty() && (candidate.contains(&needle) || needle.contains(candidate.as_str()))
    }) {
        return Some(Match {
            record: &candidates[index],
            strategy: MatchStrategy::Substring,
        });
    }

    aliases.find(&needle, candidates).map(|record| Match {
        record,
        strategy: MatchStrategy::Alias,
    })
}
