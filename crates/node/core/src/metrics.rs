//! Prometheus recorder installation.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Handle to the installed global Prometheus recorder.
#[derive(Clone)]
pub struct PrometheusRecorder {
    handle: PrometheusHandle,
    upkeep_started: Arc<AtomicBool>,
}

impl std::fmt::Debug for PrometheusRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrometheusRecorder")
            .field("upkeep_started", &self.upkeep_started.load(Ordering::Relaxed))
            .finish()
    }
}

impl PrometheusRecorder {
    /// Install the Prometheus recorder as the global metrics recorder.
    pub fn install() -> eyre::Result<Self> {
        let handle = PrometheusBuilder::new().install_recorder()?;
        Ok(Self {
            handle,
            upkeep_started: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn handle(&self) -> &PrometheusHandle {
        &self.handle
    }

    /// Start the periodic upkeep task. Only the first call has an effect.
    pub fn spawn_upkeep(&self, interval: Duration) {
        if self
            .upkeep_started
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return;
        }

        let handle = self.handle.clone();
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                handle.run_upkeep();
            }
        });
    }
}
