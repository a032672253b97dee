//! HTTP server CLI arguments.

use std::net::IpAddr;

use clap::Args;

/// HTTP server configuration overrides.
#[derive(Debug, Args, Clone, Default)]
#[command(next_help_heading = "HTTP")]
pub struct HttpArgs {
    /// HTTP listen address.
    #[arg(long = "http.addr", value_name = "ADDR")]
    pub addr: Option<IpAddr>,

    /// HTTP listen port.
    #[arg(long = "http.port", value_name = "PORT", env = "PORT")]
    pub port: Option<u16>,

    /// Allowed CORS origins, comma separated. `*` allows any origin.
    #[arg(
        long = "http.cors-origins",
        value_name = "ORIGINS",
        value_delimiter = ',',
        env = "CORS_ORIGIN"
    )]
    pub cors_origins: Option<Vec<String>>,

    /// Serve Prometheus metrics at `/metrics`.
    #[arg(long = "metrics")]
    pub metrics: bool,
}
