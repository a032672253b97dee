//! Constants used throughout the Podium node.
//!
//! All magic numbers and default values should be defined here or at the top
//! of specific modules if they are tightly coupled to that module's logic.

use std::{
    net::{IpAddr, Ipv4Addr},
    time::Duration,
};

// =============================================================================
// HTTP
// =============================================================================

/// Default HTTP listen address (all interfaces).
pub const DEFAULT_HTTP_ADDR: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Default HTTP listen port.
pub const DEFAULT_HTTP_PORT: u16 = 3000;

// =============================================================================
// Scoreboard
// =============================================================================

/// Default number of entries on the scoreboard.
pub const DEFAULT_TOP_K: usize = podium_primitives::DEFAULT_TOP_K;

/// Default largest increment accepted per request.
pub const DEFAULT_MAX_INCREMENT: u64 = podium_primitives::DEFAULT_MAX_INCREMENT;

// =============================================================================
// Broadcast
// =============================================================================

/// Default time in milliseconds a subscriber may take to accept a message.
pub const DEFAULT_SEND_TIMEOUT_MS: u64 = 1_000;

/// Default per-subscriber queue depth.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 32;

// =============================================================================
// Files
// =============================================================================

/// Config file name inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Score database file name inside the data directory.
pub const DB_FILE_NAME: &str = "scores.redb";

// =============================================================================
// Runtime
// =============================================================================

/// Interval between Prometheus recorder upkeep runs.
pub const METRICS_UPKEEP_INTERVAL: Duration = Duration::from_secs(5);

/// How long shutdown waits for the broadcast worker to drain.
pub const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);
