//! Data directory CLI arguments.

use std::path::PathBuf;

use clap::Args;

/// Data directory configuration.
#[derive(Debug, Args, Clone, Default)]
#[command(next_help_heading = "Data Directory")]
pub struct DataDirArgs {
    /// Data directory path.
    #[arg(long, value_name = "PATH")]
    pub datadir: Option<PathBuf>,

    /// Config file path. Defaults to `<datadir>/config.toml`.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
