//! Top-N leaderboard.

use serde::{Deserialize, Serialize};

/// One leaderboard row. Persisted as `{ "name", "score", "date" }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
    #[serde(rename = "date")]
    pub timestamp: String,
}

/// Entries sorted by score, highest first; equal scores keep insertion order.
///
/// Only mutated through [`Leaderboard::insert`], which re-sorts and trims, so
/// the ordering and size invariants hold between calls.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Leaderboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn entries(&self) -> &[LeaderboardEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if `score` would earn a place on a board of `capacity` rows.
    ///
    /// A full board requires strictly beating the last row.
    #[must_use]
    pub fn qualifies(&self, score: u32, capacity: usize) -> bool {
        if self.entries.len() < capacity {
            return true;
        }
        capacity > 0
            && self
                .entries
                .get(capacity - 1)
                .map_or(true, |last| score > last.score)
    }

    /// Insert, stable-sort descending and trim to `capacity`.
    ///
    /// Returns the 0-based rank of the new entry, or `None` if it was trimmed.
    pub fn insert(&mut self, entry: LeaderboardEntry, capacity: usize) -> Option<usize> {
        let score = entry.score;
        self.entries.push(entry);
        self.sort();

        // Stable sort keeps the newcomer after every equal score
        let rank = self.entries.iter().filter(|e| e.score >= score).count() - 1;
        self.entries.truncate(capacity);
        (rank < capacity).then_some(rank)
    }

    /// Restore ordering and size on a board read from storage.
    pub fn normalize(&mut self, capacity: usize) {
        self.sort();
        self.entries.truncate(capacity);
    }

    fn sort(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
    }
}
