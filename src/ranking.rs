//! High score ranking
//!
//! Top 10 scores, descending. Serializes as a bare JSON array of
//! `{"name", "score"}` records.

use serde::{Deserialize, Serialize};

use crate::consts::MAX_RANKING_ENTRIES;

/// A single ranking entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingEntry {
    /// Player's name
    pub name: String,
    /// Final score of the session
    pub score: u64,
}

/// High score leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Ranking {
    entries: Vec<RankingEntry>,
}

impl Ranking {
    /// Create empty ranking
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Build a ranking from arbitrary entries, restoring order and cap
    pub fn from_entries(mut entries: Vec<RankingEntry>) -> Self {
        // stable: equal scores keep their relative order
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(MAX_RANKING_ENTRIES);
        Self { entries }
    }

    pub fn entries(&self) -> &[RankingEntry] {
        &self.entries
    }

    /// Check if a score would make it onto the board
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_RANKING_ENTRIES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a score. Returns the rank achieved (1-indexed), or None if the
    /// entry fell off the end after truncation.
    ///
    /// A new score ranks below existing entries with the same score.
    pub fn insert(&mut self, name: impl Into<String>, score: u64) -> Option<usize> {
        let entry = RankingEntry {
            name: name.into(),
            score,
        };

        let pos = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_RANKING_ENTRIES);

        (pos < MAX_RANKING_ENTRIES).then_some(pos + 1)
    }

    /// First `n` entries (fewer if the board is short)
    pub fn top(&self, n: usize) -> &[RankingEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}
