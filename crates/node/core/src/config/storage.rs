//! Storage configuration for TOML persistence.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where scores are kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Lost on restart.
    Memory,
    /// redb database file.
    #[default]
    Redb,
}

/// Storage configuration (TOML-serializable).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Storage backend
    pub backend: StorageBackend,

    /// Database file, defaults to `<datadir>/scores.redb`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}
