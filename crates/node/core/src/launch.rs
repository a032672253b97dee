//! Wiring and running a Podium node.

use std::sync::Arc;

use eyre::Result;
use podium_api::{AppState, HttpServer};
use podium_broadcast::{Broadcaster, SubscriberRegistry};
use podium_rank::RankEngine;
use podium_service::ScoreService;
use podium_storage::{MemoryStore, RedbStore, ScoreStore, UserDirectory};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::{
    config::{PodiumConfig, StorageBackend},
    constants::{METRICS_UPKEEP_INTERVAL, SHUTDOWN_TIMEOUT},
    dirs::DataDirs,
    metrics::PrometheusRecorder,
};

/// A fully wired node, ready to serve.
#[derive(Debug)]
pub struct LaunchedNode {
    pub server: Arc<HttpServer>,
    pub state: AppState,
    worker: JoinHandle<()>,
}

impl LaunchedNode {
    /// Build every component from the configuration.
    ///
    /// Must be called inside a Tokio runtime; the broadcast worker is spawned
    /// immediately.
    pub fn build(config: &PodiumConfig, dirs: &DataDirs) -> Result<Self> {
        let metrics = if config.metrics.enabled {
            let recorder = PrometheusRecorder::install()?;
            recorder.spawn_upkeep(METRICS_UPKEEP_INTERVAL);
            Some(recorder.handle().clone())
        } else {
            None
        };

        let (store, directory) = open_store(config, dirs)?;
        let ranks = Arc::new(RankEngine::new(store.clone(), directory));

        let broadcaster = Arc::new(Broadcaster::new(
            Arc::new(SubscriberRegistry::new()),
            ranks.clone(),
            config.broadcast_config(),
        ));
        let (trigger, worker) = broadcaster.spawn_worker();

        let service = Arc::new(ScoreService::new(
            store,
            ranks,
            Arc::new(trigger),
            config.service_config(),
        ));

        let auth = config.auth.token_table();
        if auth.is_empty() {
            warn!("No auth tokens configured, every score update will be rejected");
        } else {
            info!(tokens = auth.len(), "Loaded auth tokens");
        }

        let state = AppState {
            service,
            broadcaster,
            auth: Arc::new(auth),
            metrics,
        };
        let server = HttpServer::new(config.http_server_config(), state.clone());

        Ok(Self {
            server,
            state,
            worker,
        })
    }

    /// Serve until Ctrl-C, then shut down gracefully.
    pub async fn run_until_ctrl_c(self) -> Result<()> {
        let serving = self.server.clone();
        let mut server_task = tokio::spawn(async move { serving.start().await });

        tokio::select! {
            result = &mut server_task => {
                // The server stopped on its own, usually a bind failure.
                result??;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl-C, shutting down");
                self.server.stop()?;
                server_task.await??;
            }
        }

        self.shutdown().await;
        Ok(())
    }

    /// Stop the broadcast worker once every trigger handle is gone.
    async fn shutdown(self) {
        let Self {
            server,
            state,
            worker,
        } = self;
        drop(server);
        drop(state);

        if tokio::time::timeout(SHUTDOWN_TIMEOUT, worker).await.is_err() {
            warn!("Broadcast worker did not stop in time");
        } else {
            info!("Shutdown complete");
        }
    }
}

fn open_store(
    config: &PodiumConfig,
    dirs: &DataDirs,
) -> Result<(Arc<dyn ScoreStore>, Arc<dyn UserDirectory>)> {
    match config.storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory score store");
            let store = Arc::new(MemoryStore::new());
            let scores: Arc<dyn ScoreStore> = store.clone();
            let users: Arc<dyn UserDirectory> = store;
            Ok((scores, users))
        }
        StorageBackend::Redb => {
            let path = config.storage.path.clone().unwrap_or_else(|| dirs.db_file());
            let store = Arc::new(RedbStore::open(&path)?);
            info!(path = %path.display(), players = store.total_count()?, "Opened score database");
            let scores: Arc<dyn ScoreStore> = store.clone();
            let users: Arc<dyn UserDirectory> = store;
            Ok((scores, users))
        }
    }
}
