//! Node command - Run the leaderboard service

use eyre::Result;
use tracing::info;

use crate::{cli::NodeArgs, config::PodiumConfig, dirs::DataDirs, launch::LaunchedNode};

/// Run the node command
pub async fn run(args: NodeArgs) -> Result<()> {
    info!(version = env!("CARGO_PKG_VERSION"), "Starting Podium");

    let dirs = DataDirs::new(&args.datadir)?;
    info!("Data directory: {}", dirs.root.display());

    // Load or create configuration
    let config_path = dirs.config_file();
    let mut config = PodiumConfig::load_or_create(&config_path)?;
    config.apply_cli_args(&args.http, &args.scoreboard, &args.storage);
    config.validate()?;
    info!("Configuration loaded from: {}", config_path.display());

    info!(
        addr = %config.http.socket_addr(),
        top_k = config.scoreboard.top_k,
        max_increment = config.scoreboard.max_increment,
        backend = ?config.storage.backend,
        metrics = config.metrics.enabled,
        "Node configuration"
    );

    LaunchedNode::build(&config, &dirs)?.run_until_ctrl_c().await
}
