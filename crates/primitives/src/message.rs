//! Real-time scoreboard message envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{RankedEntry, ScoreboardSnapshot};

/// Why a message was pushed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Current state, sent once when an observer connects.
    ConnectionEstablished,
    /// Sent after a score mutation succeeded.
    ScoreboardUpdate,
}

impl MessageKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConnectionEstablished => "connection_established",
            Self::ScoreboardUpdate => "scoreboard_update",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreboardData {
    pub scores: Vec<RankedEntry>,
    pub total_players: u64,
    pub updated_at: DateTime<Utc>,
}

/// `{type, data: {scores, totalPlayers, updatedAt}, timestamp}`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreboardMessage {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub data: ScoreboardData,
    pub timestamp: DateTime<Utc>,
}

impl ScoreboardMessage {
    pub fn new(kind: MessageKind, snapshot: ScoreboardSnapshot) -> Self {
        let now = Utc::now();
        let (scores, total_players) = snapshot.into_parts();
        Self {
            kind,
            data: ScoreboardData {
                scores,
                total_players,
                updated_at: now,
            },
            timestamp: now,
        }
    }
}
