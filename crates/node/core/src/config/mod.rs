//! Node configuration handling.
//!
//! Configuration is split into submodules:
//! - `http` - listen address, CORS and metrics
//! - `scoreboard` - top-K, increment ceiling and live update delivery
//! - `storage` - score storage backend
//! - `auth` - accepted bearer tokens

mod auth;
mod http;
mod scoreboard;
mod storage;

pub use auth::{AuthConfig, TokenEntry};
pub use http::{HttpConfig, MetricsConfig};
pub use scoreboard::{BroadcastSettings, ScoreboardConfig};
pub use storage::{StorageBackend, StorageConfig};

use std::{fs, path::Path};

use eyre::{Result, WrapErr, ensure};
use podium_api::HttpServerConfig;
use podium_broadcast::BroadcastConfig;
use podium_service::ServiceConfig;
use serde::{Deserialize, Serialize};

use crate::args::{HttpArgs, ScoreboardArgs, StorageArgs};

/// Configuration for a Podium node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PodiumConfig {
    pub http: HttpConfig,
    pub scoreboard: ScoreboardConfig,
    pub broadcast: BroadcastSettings,
    pub storage: StorageConfig,
    pub metrics: MetricsConfig,
    pub auth: AuthConfig,
}

impl PodiumConfig {
    /// Load the configuration from the given path, or create a default one if it doesn't exist.
    pub fn load_or_create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            let content = fs::read_to_string(path)
                .wrap_err_with(|| format!("failed to read {}", path.display()))?;
            let config: Self = toml::from_str(&content)
                .wrap_err_with(|| format!("invalid config file {}", path.display()))?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save(path)?;
            Ok(config)
        }
    }

    /// Save the configuration to the given path.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, self.to_toml()?)?;

        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Apply command line arguments to override the configuration.
    pub fn apply_cli_args(
        &mut self,
        http_args: &HttpArgs,
        scoreboard_args: &ScoreboardArgs,
        storage_args: &StorageArgs,
    ) {
        if let Some(addr) = http_args.addr {
            self.http.addr = addr;
        }
        if let Some(port) = http_args.port {
            self.http.port = port;
        }
        if let Some(origins) = &http_args.cors_origins {
            self.http.cors_origins = origins.clone();
        }
        if http_args.metrics {
            self.metrics.enabled = true;
        }

        if let Some(top_k) = scoreboard_args.top_k {
            self.scoreboard.top_k = top_k;
        }
        if let Some(max_increment) = scoreboard_args.max_increment {
            self.scoreboard.max_increment = max_increment;
        }
        if let Some(send_timeout_ms) = scoreboard_args.send_timeout_ms {
            self.broadcast.send_timeout_ms = send_timeout_ms;
        }
        if let Some(channel_capacity) = scoreboard_args.channel_capacity {
            self.broadcast.channel_capacity = channel_capacity;
        }

        if storage_args.memory_only {
            self.storage.backend = StorageBackend::Memory;
        }
        if let Some(path) = &storage_args.path {
            self.storage.backend = StorageBackend::Redb;
            self.storage.path = Some(path.clone());
        }
    }

    /// Reject values the node cannot run with.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.scoreboard.top_k > 0, "scoreboard.top_k must be at least 1");
        ensure!(
            self.scoreboard.max_increment > 0,
            "scoreboard.max_increment must be at least 1"
        );
        ensure!(
            self.broadcast.send_timeout_ms > 0,
            "broadcast.send_timeout_ms must be at least 1"
        );
        ensure!(
            self.broadcast.channel_capacity > 0,
            "broadcast.channel_capacity must be at least 1"
        );
        for entry in &self.auth.tokens {
            ensure!(!entry.token.is_empty(), "auth token for {} is empty", entry.user_id);
            ensure!(!entry.user_id.is_empty(), "auth token with empty user_id");
        }
        Ok(())
    }

    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            max_increment: self.scoreboard.max_increment,
            top_k: self.scoreboard.top_k,
        }
    }

    pub fn broadcast_config(&self) -> BroadcastConfig {
        self.broadcast.to_broadcast_config(self.scoreboard.top_k)
    }

    pub fn http_server_config(&self) -> HttpServerConfig {
        HttpServerConfig {
            addr: self.http.socket_addr(),
            cors_origins: self.http.cors_origins.clone(),
        }
    }
}
