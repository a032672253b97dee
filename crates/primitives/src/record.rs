//! Stored score records and their total order.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::UserId;

/// The one stored row per user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    pub user_id: UserId,
    pub score: u64,
    pub updated_at: DateTime<Utc>,
    /// Creation sequence assigned by the store. Strictly increasing across
    /// records and never changed afterwards.
    pub seq: u64,
}

/// Leaderboard order: score descending, then creation sequence ascending.
///
/// Records created earlier win ties. `user_id` is a last resort that only
/// matters if a store ever hands out a duplicate sequence number.
pub fn standing_order(a: &ScoreRecord, b: &ScoreRecord) -> Ordering {
    b.score
        .cmp(&a.score)
        .then(a.seq.cmp(&b.seq))
        .then_with(|| a.user_id.cmp(&b.user_id))
}

impl ScoreRecord {
    /// Whether `self` is placed strictly before `other` on the leaderboard.
    pub fn ranks_ahead_of(&self, other: &ScoreRecord) -> bool {
        standing_order(self, other) == Ordering::Less
    }
}
