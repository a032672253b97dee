//! Directory management for the Podium node.

use std::{fs, path::PathBuf};

use directories::ProjectDirs;
use eyre::{Result, eyre};

use crate::{
    args::DataDirArgs,
    constants::{CONFIG_FILE_NAME, DB_FILE_NAME},
};

/// Returns the default project directories for Podium.
pub fn default_project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("rs", "podium", "podium")
}

/// Returns the default data directory path.
pub fn default_data_dir() -> Option<PathBuf> {
    default_project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

/// Resolved data directory and the files inside it.
#[derive(Debug, Clone)]
pub struct DataDirs {
    /// Root data directory
    pub root: PathBuf,
    config_override: Option<PathBuf>,
}

impl DataDirs {
    /// Resolve the data directory from command line args, creating it if needed.
    pub fn new(args: &DataDirArgs) -> Result<Self> {
        let root = args
            .datadir
            .clone()
            .unwrap_or_else(|| default_data_dir().unwrap_or_else(|| PathBuf::from(".podium")));

        fs::create_dir_all(&root)
            .map_err(|e| eyre!("Failed to create directory {}: {}", root.display(), e))?;

        Ok(Self {
            root,
            config_override: args.config.clone(),
        })
    }

    /// Returns the path to the config file.
    pub fn config_file(&self) -> PathBuf {
        self.config_override
            .clone()
            .unwrap_or_else(|| self.root.join(CONFIG_FILE_NAME))
    }

    /// Returns the default path to the score database.
    pub fn db_file(&self) -> PathBuf {
        self.root.join(DB_FILE_NAME)
    }
}
