//! Scoreboard and broadcast CLI arguments.

use clap::Args;

/// Scoreboard configuration overrides.
#[derive(Debug, Args, Clone, Default)]
#[command(next_help_heading = "Scoreboard")]
pub struct ScoreboardArgs {
    /// Number of entries on the scoreboard.
    #[arg(long = "scoreboard.top-k", value_name = "COUNT")]
    pub top_k: Option<usize>,

    /// Largest increment accepted per request.
    #[arg(long = "scoreboard.max-increment", value_name = "POINTS")]
    pub max_increment: Option<u64>,

    /// Time a live subscriber may take to accept an update.
    #[arg(long = "broadcast.send-timeout", value_name = "MS")]
    pub send_timeout_ms: Option<u64>,

    /// Per-subscriber queue depth.
    #[arg(long = "broadcast.channel-capacity", value_name = "COUNT")]
    pub channel_capacity: Option<usize>,
}
