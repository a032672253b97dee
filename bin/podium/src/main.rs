//! Podium live leaderboard binary.

#[tokio::main]
async fn main() -> eyre::Result<()> {
    podium_node_core::cli::run().await
}
