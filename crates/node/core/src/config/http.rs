//! HTTP configuration for TOML persistence.

use std::net::{IpAddr, SocketAddr};

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_HTTP_ADDR, DEFAULT_HTTP_PORT};

/// HTTP server configuration (TOML-serializable).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Listen address
    pub addr: IpAddr,

    /// Listen port
    pub port: u16,

    /// Allowed CORS origins, empty allows any
    pub cors_origins: Vec<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            addr: DEFAULT_HTTP_ADDR,
            port: DEFAULT_HTTP_PORT,
            cors_origins: Vec::new(),
        }
    }
}

impl HttpConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.addr, self.port)
    }
}

/// Metrics configuration (TOML-serializable).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Whether to serve Prometheus metrics at `/metrics`
    pub enabled: bool,
}
