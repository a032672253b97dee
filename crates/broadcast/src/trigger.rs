//! Decouples score mutations from broadcast delivery.

use std::sync::Arc;

use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{Instrument, debug, info_span, warn};

use crate::Broadcaster;

/// Receives a signal after every successful score mutation.
pub trait UpdateNotifier: Send + Sync {
    /// Must return without waiting on delivery.
    fn notify_update(&self);
}

/// Handle queueing publishes on the broadcast worker.
///
/// Every trigger produces exactly one publish, in order. The worker stops
/// once every trigger handle has been dropped.
#[derive(Clone, Debug)]
pub struct BroadcastTrigger {
    tx: mpsc::UnboundedSender<()>,
}

impl BroadcastTrigger {
    /// Queue a publish. Returns `false` if the worker has stopped.
    pub fn trigger(&self) -> bool {
        self.tx.send(()).is_ok()
    }
}

impl UpdateNotifier for BroadcastTrigger {
    fn notify_update(&self) {
        if !self.trigger() {
            warn!("Broadcast worker stopped, scoreboard update not published");
        }
    }
}

impl Broadcaster {
    /// Spawn the publish worker on the current runtime.
    pub fn spawn_worker(self: &Arc<Self>) -> (BroadcastTrigger, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::unbounded_channel::<()>();
        let broadcaster = Arc::clone(self);

        let handle = tokio::spawn(
            async move {
                while rx.recv().await.is_some() {
                    if let Err(error) = broadcaster.publish().await {
                        warn!(%error, "Scoreboard broadcast failed");
                    }
                }
                debug!("Broadcast worker stopped");
            }
            .instrument(info_span!("broadcast_worker")),
        );

        (BroadcastTrigger { tx }, handle)
    }
}
