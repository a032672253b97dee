//! Derived ranking views.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::UserId;

/// Number of entries in a default scoreboard.
pub const DEFAULT_TOP_K: usize = 10;

/// A user's position on the leaderboard. Computed on demand, never stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEntry {
    pub user_id: UserId,
    pub username: String,
    pub score: u64,
    /// 1-based position in the full ordering.
    pub rank: u64,
    pub updated_at: DateTime<Utc>,
}

/// The top of the leaderboard plus the number of ranked players.
///
/// Built once per query or broadcast and never modified afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreboardSnapshot {
    scores: Vec<RankedEntry>,
    total_players: u64,
}

impl ScoreboardSnapshot {
    pub fn new(scores: Vec<RankedEntry>, total_players: u64) -> Self {
        debug_assert!(scores.len() as u64 <= total_players);
        Self {
            scores,
            total_players,
        }
    }

    pub fn scores(&self) -> &[RankedEntry] {
        &self.scores
    }

    pub fn total_players(&self) -> u64 {
        self.total_players
    }

    /// Ranks are exactly `1..=len` in order and `len <= total_players`.
    pub fn is_well_formed(&self) -> bool {
        self.scores.len() as u64 <= self.total_players
            && self
                .scores
                .iter()
                .zip(1u64..)
                .all(|(entry, expected)| entry.rank == expected)
    }

    pub fn into_parts(self) -> (Vec<RankedEntry>, u64) {
        (self.scores, self.total_players)
    }
}
