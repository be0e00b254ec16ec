//! In-memory high-score tables
//!
//! One top-10 table per game mode plus a lifetime coin counter. Reading and
//! writing these to disk is left to the caller.

use ordered_float::OrderedFloat;
use sorted_vec::SortedVec;
use std::cmp::{Ordering, Reverse};
use std::collections::HashMap;

use super::game_state::GameMode;
use super::world::SessionSummary;

/// Entries kept per mode
pub const LEADERBOARD_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    pub name: String,
    pub score: u32,
    /// Meters travelled
    pub distance: f32,
    pub coins: u32,
    /// Caller-supplied timestamp, seconds since the Unix epoch
    pub recorded_at: u64,
}

/// Orders entries best-first: score, then distance, then the older record
#[derive(Debug, Clone)]
struct Ranked(LeaderboardEntry);

impl Ranked {
    fn key(&self) -> (Reverse<u32>, Reverse<OrderedFloat<f32>>, u64, &str) {
        (
            Reverse(self.0.score),
            Reverse(OrderedFloat(self.0.distance)),
            self.0.recorded_at,
            self.0.name.as_str(),
        )
    }
}

impl PartialEq for Ranked {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Ranked {}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ranked {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

#[derive(Debug, Clone, Default)]
pub struct Leaderboard {
    tables: HashMap<&'static str, SortedVec<Ranked>>,
    /// Coins collected over every recorded session
    pub total_coins: u64,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `entry` into the table for `mode`.
    ///
    /// A name appears at most once per table; an existing record is replaced
    /// only by a strictly higher score. Returns the 1-based rank of the new
    /// entry, or `None` if it was not kept.
    pub fn submit(&mut self, mode: GameMode, entry: LeaderboardEntry) -> Option<usize> {
        let table = self.tables.entry(mode.name()).or_insert_with(SortedVec::new);

        if let Some(existing) = table.iter().position(|r| r.0.name == entry.name) {
            if entry.score <= table[existing].0.score {
                return None;
            }
            table.remove_index(existing);
        }

        let index = table.insert(Ranked(entry));
        if table.len() > LEADERBOARD_SIZE {
            table.pop();
            if index >= LEADERBOARD_SIZE {
                return None;
            }
        }
        Some(index + 1)
    }

    /// Would `score` make it onto the table for `mode`?
    pub fn qualifies(&self, mode: GameMode, score: u32) -> bool {
        match self.tables.get(mode.name()) {
            Some(table) if table.len() >= LEADERBOARD_SIZE => {
                table.last().is_some_and(|lowest| score > lowest.0.score)
            }
            _ => true,
        }
    }

    /// Entries for `mode`, best first
    pub fn entries(&self, mode: GameMode) -> Vec<&LeaderboardEntry> {
        self.tables
            .get(mode.name())
            .map(|table| table.iter().map(|r| &r.0).collect())
            .unwrap_or_default()
    }

    pub fn best(&self, mode: GameMode) -> Option<&LeaderboardEntry> {
        self.tables
            .get(mode.name())
            .and_then(|table| table.first())
            .map(|r| &r.0)
    }

    /// Bank the coins of a finished session and submit its score
    pub fn record_session(
        &mut self,
        name: impl Into<String>,
        summary: &SessionSummary,
        recorded_at: u64,
    ) -> Option<usize> {
        self.total_coins += u64::from(summary.coins);
        self.submit(
            summary.mode,
            LeaderboardEntry {
                name: name.into(),
                score: summary.score,
                distance: summary.distance,
                coins: summary.coins,
                recorded_at,
            },
        )
    }
}
