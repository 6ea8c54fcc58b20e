//! Kill-turn reports produced by the search

use serde::{Deserialize, Serialize};
use std::fmt;

/// Confidence attached to a kill-turn entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    /// Exact probability of a kill at this turn count, in percent (0, 100]
    Percent(f64),
    /// Deterministic worst-case bound; the exact probability was not computed
    WorstCaseBound,
}

impl Confidence {
    /// The percentage, or `None` for the worst-case bound.
    pub fn percent(self) -> Option<f64> {
        match self {
            Confidence::Percent(p) => Some(p),
            Confidence::WorstCaseBound => None,
        }
    }

    pub fn is_bound(self) -> bool {
        matches!(self, Confidence::WorstCaseBound)
    }
}

/// One `(turns, confidence)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KillEntry {
    /// Number of attacks
    pub turns: u32,
    pub confidence: Confidence,
}

impl KillEntry {
    pub fn percent(turns: u32, percent: f64) -> Self {
        KillEntry {
            turns,
            confidence: Confidence::Percent(percent),
        }
    }

    pub fn bound(turns: u32) -> Self {
        KillEntry {
            turns,
            confidence: Confidence::WorstCaseBound,
        }
    }
}

impl fmt::Display for KillEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.confidence {
            Confidence::Percent(p) => write!(f, "{}HKO {:.1}%", self.turns, p),
            Confidence::WorstCaseBound => write!(f, "<={}HKO (bound)", self.turns),
        }
    }
}

/// Ordered kill-turn entries, ascending by `turns`.
///
/// A report from `find_kill` is never empty: when no near-certain kill is
/// found inside the horizon it ends with a [`Confidence::WorstCaseBound`]
/// entry. Reports for attacks that can miss carry percent entries only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KillReport {
    entries: Vec<KillEntry>,
}

impl KillReport {
    pub fn new() -> Self {
        KillReport { entries: Vec::new() }
    }

    /// Append an entry.
    ///
    /// Percent entries must be pushed in ascending turn order. The worst-case
    /// bound always goes last and is exempt: with crits weaker than normal
    /// hits it can name fewer turns than entries that stayed below certainty.
    pub fn push(&mut self, entry: KillEntry) {
        debug_assert!(
            entry.confidence.is_bound()
                || self.entries.last().map_or(true, |last| last.turns < entry.turns),
            "kill report entries must ascend by turns"
        );
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[KillEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, KillEntry> {
        self.entries.iter()
    }

    /// First entry, i.e. the fewest attacks with a recorded kill chance.
    pub fn first(&self) -> Option<&KillEntry> {
        self.entries.first()
    }

    /// Fewest attacks with an exact kill chance of at least `percent`.
    pub fn turns_at(&self, percent: f64) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.confidence.percent().is_some_and(|p| p >= percent))
            .map(|e| e.turns)
    }
}

impl<'a> IntoIterator for &'a KillReport {
    type Item = &'a KillEntry;
    type IntoIter = std::slice::Iter<'a, KillEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Display for KillReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{entry}")?;
        }
        Ok(())
    }
}
