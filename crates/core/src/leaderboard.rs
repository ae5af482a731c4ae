//! Leaderboard module - best score per player, highest first
//!
//! Entries live in a `Vec` kept sorted by descending score. A player appears at
//! most once and only their best score is retained. Among equal scores the
//! entry recorded first stays ahead.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// One leaderboard row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankEntry {
    pub username: String,
    pub score: u32,
}

/// Descending-by-score ranking
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    entries: Vec<RankEntry>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from arbitrary `(username, score)` pairs, keeping each player's best
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        let mut board = Self::new();
        for (name, score) in pairs {
            board.insert_or_update(name, score);
        }
        board
    }

    /// Record a score for `username`.
    ///
    /// New players are inserted; existing players are only updated when the new
    /// score beats their current one. Returns true if the board changed.
    pub fn insert_or_update(&mut self, username: impl Into<String>, score: u32) -> bool {
        let username = username.into();

        if let Some(existing) = self.user_score(&username) {
            if score <= existing {
                return false;
            }
            self.remove(&username);
        }

        // Insert after every entry with an equal or higher score
        let at = self.entries.partition_point(|e| e.score >= score);
        debug!(username = %username, score, rank = at + 1, "leaderboard updated");
        self.entries.insert(at, RankEntry { username, score });
        true
    }

    /// Remove `username`; returns false when not present
    pub fn remove(&mut self, username: &str) -> bool {
        match self.entries.iter().position(|e| e.username == username) {
            Some(idx) => {
                self.entries.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Highest score on the board (0 when empty)
    pub fn best_score(&self) -> u32 {
        self.entries.first().map(|e| e.score).unwrap_or(0)
    }

    pub fn user_score(&self, username: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.username == username)
            .map(|e| e.score)
    }

    /// The first `k` entries (fewer if the board is shorter)
    pub fn top(&self, k: usize) -> &[RankEntry] {
        &self.entries[..k.min(self.entries.len())]
    }

    pub fn entries(&self) -> &[RankEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
