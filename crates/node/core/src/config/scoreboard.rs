//! Scoreboard and broadcast configuration for TOML persistence.

use std::time::Duration;

use podium_broadcast::BroadcastConfig;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CHANNEL_CAPACITY, DEFAULT_MAX_INCREMENT, DEFAULT_SEND_TIMEOUT_MS, DEFAULT_TOP_K,
};

/// Scoreboard configuration (TOML-serializable).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreboardConfig {
    /// Number of entries on the scoreboard and in every push
    pub top_k: usize,

    /// Largest increment accepted per request
    pub max_increment: u64,
}

impl Default for ScoreboardConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            max_increment: DEFAULT_MAX_INCREMENT,
        }
    }
}

/// Live update delivery configuration (TOML-serializable).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BroadcastSettings {
    /// Milliseconds a subscriber may take to accept one message
    pub send_timeout_ms: u64,

    /// Per-subscriber queue depth
    pub channel_capacity: usize,
}

impl Default for BroadcastSettings {
    fn default() -> Self {
        Self {
            send_timeout_ms: DEFAULT_SEND_TIMEOUT_MS,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl BroadcastSettings {
    pub fn to_broadcast_config(&self, top_k: usize) -> BroadcastConfig {
        BroadcastConfig {
            top_k,
            send_timeout: Duration::from_millis(self.send_timeout_ms),
            channel_capacity: self.channel_capacity,
        }
    }
}
