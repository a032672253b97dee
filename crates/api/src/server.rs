//! HTTP server lifecycle.

use std::{
    net::SocketAddr,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use axum::{
    Router,
    http::{HeaderValue, Method, header},
};
use tokio::{net::TcpListener, sync::watch};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{info, warn};

use crate::{AppState, router};

/// Configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpServerConfig {
    /// Address to bind to.
    pub addr: SocketAddr,
    /// Allowed CORS origins. Empty or `*` allows any origin.
    pub cors_origins: Vec<String>,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            cors_origins: Vec::new(),
        }
    }
}

/// HTTP and WebSocket server for the leaderboard.
pub struct HttpServer {
    config: HttpServerConfig,
    app: Router,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
    running: AtomicBool,
}

impl HttpServer {
    pub fn new(config: HttpServerConfig, state: AppState) -> Arc<Self> {
        let app = router(state).layer(cors_layer(&config.cors_origins));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Arc::new(Self {
            config,
            app,
            shutdown_tx,
            shutdown_rx,
            running: AtomicBool::new(false),
        })
    }

    /// Bind the configured address and serve until [`stop`](Self::stop).
    pub async fn start(&self) -> eyre::Result<()> {
        let listener = TcpListener::bind(self.config.addr).await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener until [`stop`](Self::stop).
    pub async fn serve(&self, listener: TcpListener) -> eyre::Result<()> {
        let addr = listener.local_addr()?;
        info!(%addr, "Starting HTTP server");
        self.running.store(true, Ordering::SeqCst);

        let mut shutdown_rx = self.shutdown_rx.clone();
        let result = axum::serve(listener, self.app.clone())
            .with_graceful_shutdown(async move {
                shutdown_rx.changed().await.ok();
            })
            .await;

        self.running.store(false, Ordering::SeqCst);

        match result {
            Ok(()) => {
                info!("HTTP server stopped");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "HTTP server error");
                Err(e.into())
            }
        }
    }

    pub fn stop(&self) -> eyre::Result<()> {
        info!("Stopping HTTP server");
        self.shutdown_tx.send(true)?;
        Ok(())
    }

    pub fn address(&self) -> SocketAddr {
        self.config.addr
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl std::fmt::Debug for HttpServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpServer")
            .field("config", &self.config)
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
