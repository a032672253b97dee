//! Command-line interface for the Podium node.

use clap::{Args, Parser, Subcommand};
use eyre::Result;

use crate::{
    args::{DataDirArgs, HttpArgs, LogArgs, ScoreboardArgs, StorageArgs},
    commands,
    logging::init_logging,
};

/// Podium - live leaderboard service
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Logging configuration (applies to all subcommands).
    #[command(flatten)]
    pub logs: LogArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Podium commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the leaderboard service
    Node(NodeArgs),

    /// Manage node configuration
    Config(ConfigArgs),
}

/// Arguments for the 'node' command
#[derive(Debug, Args)]
pub struct NodeArgs {
    #[command(flatten)]
    pub datadir: DataDirArgs,

    #[command(flatten)]
    pub http: HttpArgs,

    #[command(flatten)]
    pub scoreboard: ScoreboardArgs,

    #[command(flatten)]
    pub storage: StorageArgs,
}

/// Arguments for the 'config' command
#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub datadir: DataDirArgs,

    /// Write the default configuration if no config file exists
    #[arg(long)]
    pub init: bool,

    /// Print the current configuration
    #[arg(long)]
    pub show: bool,
}

/// Parse the command line, initialize logging and run the selected command.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.logs)?;

    match cli.command {
        Commands::Node(args) => commands::node::run(args).await,
        Commands::Config(args) => commands::config::run(args),
    }
}
