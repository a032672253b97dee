//! State shared by every handler.

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use podium_broadcast::Broadcaster;
use podium_service::ScoreService;

use crate::Authenticator;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ScoreService>,
    pub broadcaster: Arc<Broadcaster>,
    pub auth: Arc<dyn Authenticator>,
    /// Rendered at `/metrics` when set.
    pub metrics: Option<PrometheusHandle>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("service", &self.service)
            .field("broadcaster", &self.broadcaster)
            .field("metrics", &self.metrics.is_some())
            .finish_non_exhaustive()
    }
}
