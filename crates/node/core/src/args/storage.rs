//! Storage CLI arguments.

use std::path::PathBuf;

use clap::Args;

/// Storage configuration overrides.
#[derive(Debug, Args, Clone, Default)]
#[command(next_help_heading = "Database")]
pub struct StorageArgs {
    /// Use the in-memory store (no persistence).
    #[arg(long = "db.memory", conflicts_with = "path")]
    pub memory_only: bool,

    /// Score database file. Defaults to `<datadir>/scores.redb`.
    #[arg(long = "db.path", value_name = "PATH")]
    pub path: Option<PathBuf>,
}
