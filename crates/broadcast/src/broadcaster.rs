//! Snapshot fan-out to every registered observer.

use std::{sync::Arc, time::Duration};

use futures::future::join_all;
use podium_primitives::{DEFAULT_TOP_K, MessageKind, ScoreboardMessage, ScoreboardSnapshot};
use podium_rank::RankEngine;
use podium_storage::StoreResult;
use tokio::sync::{
    Mutex,
    mpsc::{self, error::SendTimeoutError},
};
use tracing::{debug, warn};

use crate::{
    BroadcastError, DeliveryError, Payload, SubscriberRegistry, Subscription, SubscriptionId,
    metrics::BroadcastMetrics,
};

/// Default time a single subscriber may take to accept a message.
pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(1);

/// Default per-subscriber queue depth.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 32;

/// Anything that can produce a top-K scoreboard snapshot.
pub trait SnapshotSource: Send + Sync {
    fn snapshot(&self, limit: usize) -> StoreResult<ScoreboardSnapshot>;
}

impl SnapshotSource for RankEngine {
    fn snapshot(&self, limit: usize) -> StoreResult<ScoreboardSnapshot> {
        RankEngine::snapshot(self, limit)
    }
}

/// Broadcaster tuning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BroadcastConfig {
    /// Number of entries in every pushed snapshot.
    pub top_k: usize,
    /// Bound on how long one subscriber may hold up a publish.
    pub send_timeout: Duration,
    /// Per-subscriber queue depth.
    pub channel_capacity: usize,
}

impl Default for BroadcastConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            send_timeout: DEFAULT_SEND_TIMEOUT,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

/// Outcome of a single publish.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishReport {
    pub delivered: usize,
    pub dropped: Vec<SubscriptionId>,
}

/// Builds scoreboard messages and pushes them to subscribers.
pub struct Broadcaster {
    registry: Arc<SubscriberRegistry>,
    source: Arc<dyn SnapshotSource>,
    config: BroadcastConfig,
    metrics: BroadcastMetrics,
    /// Held while a snapshot is taken and its audience is fixed.
    publish_lock: Mutex<()>,
}

impl Broadcaster {
    pub fn new(
        registry: Arc<SubscriberRegistry>,
        source: Arc<dyn SnapshotSource>,
        config: BroadcastConfig,
    ) -> Self {
        Self {
            registry,
            source,
            config,
            metrics: BroadcastMetrics::default(),
            publish_lock: Mutex::new(()),
        }
    }

    pub fn registry(&self) -> &Arc<SubscriberRegistry> {
        &self.registry
    }

    pub fn config(&self) -> &BroadcastConfig {
        &self.config
    }

    /// Register a new observer.
    ///
    /// The `connection_established` snapshot is queued on the fresh channel
    /// before the channel becomes visible to publishers, so it is always the
    /// first message the observer reads. Subscribing and publishing exclude
    /// each other until the channel is registered: a publish either sees the
    /// new observer or took its snapshot before the initial one was taken.
    pub async fn subscribe(&self) -> Result<Subscription, BroadcastError> {
        let (tx, rx) = mpsc::channel(self.config.channel_capacity.max(1));

        let id = {
            let _guard = self.publish_lock.lock().await;
            let payload = self.encode(MessageKind::ConnectionEstablished).await?;
            tx.try_send(payload).map_err(|_| DeliveryError::Closed)?;
            self.registry.register(tx)
        };
        debug!(%id, subscribers = self.registry.len(), "Observer subscribed");

        Ok(Subscription::new(id, rx, Arc::clone(&self.registry)))
    }

    /// Push the current top-K to every registered observer.
    ///
    /// The message is built and serialized once. Observers that are closed
    /// or do not accept the message within the send timeout are removed from
    /// the registry; their failure is logged and never returned.
    pub async fn publish(&self) -> Result<PublishReport, BroadcastError> {
        let (payload, targets) = {
            let _guard = self.publish_lock.lock().await;
            let payload = self.encode(MessageKind::ScoreboardUpdate).await?;
            (payload, self.registry.senders())
        };
        let timeout = self.config.send_timeout;

        let results = join_all(targets.iter().map(|(id, tx)| {
            let payload = Arc::clone(&payload);
            async move { (*id, deliver(tx, payload, timeout).await) }
        }))
        .await;

        let mut report = PublishReport::default();
        for (id, result) in results {
            match result {
                Ok(()) => report.delivered += 1,
                Err(error) => {
                    warn!(%id, %error, "Dropping scoreboard subscriber");
                    self.registry.unregister(id);
                    report.dropped.push(id);
                }
            }
        }

        self.metrics
            .record_publish(report.delivered, report.dropped.len());
        debug!(
            delivered = report.delivered,
            dropped = report.dropped.len(),
            "Published scoreboard update"
        );

        Ok(report)
    }

    /// Build and serialize a message. The snapshot scan runs on the blocking pool.
    async fn encode(&self, kind: MessageKind) -> Result<Payload, BroadcastError> {
        let source = Arc::clone(&self.source);
        let limit = self.config.top_k;
        let snapshot = tokio::task::spawn_blocking(move || source.snapshot(limit)).await??;
        let message = ScoreboardMessage::new(kind, snapshot);
        Ok(Arc::from(serde_json::to_string(&message)?))
    }
}

impl std::fmt::Debug for Broadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Broadcaster")
            .field("registry", &self.registry)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

async fn deliver(
    tx: &mpsc::Sender<Payload>,
    payload: Payload,
    timeout: Duration,
) -> Result<(), DeliveryError> {
    tx.send_timeout(payload, timeout)
        .await
        .map_err(|error| match error {
            SendTimeoutError::Closed(_) => DeliveryError::Closed,
            SendTimeoutError::Timeout(_) => DeliveryError::Timeout(timeout),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use podium_primitives::{Identity, Increment, UserId};
    use parking_lot::Mutex as SyncMutex;
    use podium_storage::{MemoryStore, ScoreStore, UserDirectory};
    use serde_json::Value;
    use tokio::sync::oneshot;

    type Gate = (oneshot::Sender<()>, oneshot::Receiver<()>);

    /// Stalls the first snapshot after it has been taken until released.
    struct GatedSource {
        inner: RankEngine,
        gate: SyncMutex<Option<Gate>>,
    }

    impl SnapshotSource for GatedSource {
        fn snapshot(&self, limit: usize) -> StoreResult<ScoreboardSnapshot> {
            let snapshot = self.inner.snapshot(limit)?;
            let gate = self.gate.lock().take();
            if let Some((taken, release)) = gate {
                let _ = taken.send(());
                let _ = release.blocking_recv();
            }
            Ok(snapshot)
        }
    }

    struct Fixture {
        store: Arc<MemoryStore>,
        broadcaster: Broadcaster,
    }

    fn fixture(config: BroadcastConfig) -> Fixture {
        let store = Arc::new(MemoryStore::new());
        let engine = RankEngine::new(store.clone(), store.clone());
        let broadcaster = Broadcaster::new(
            Arc::new(SubscriberRegistry::new()),
            Arc::new(engine),
            config,
        );
        Fixture { store, broadcaster }
    }

    fn bump(store: &MemoryStore, user: &str, delta: u64) {
        store
            .record_username(&Identity::new(user, user.to_uppercase()))
            .unwrap();
        store
            .apply_increment(&UserId::from(user), Increment::from_unsigned(delta, 1000).unwrap())
            .unwrap();
    }

    fn parse(payload: &Payload) -> Value {
        serde_json::from_str(payload).unwrap()
    }

    #[tokio::test]
    async fn test_subscribe_sends_initial_snapshot_first() {
        let fx = fixture(BroadcastConfig::default());
        bump(&fx.store, "alice", 50);

        let mut sub = fx.broadcaster.subscribe().await.unwrap();
        assert!(fx.broadcaster.registry().contains(sub.id()));

        fx.broadcaster.publish().await.unwrap();

        let first = parse(&sub.recv().await.unwrap());
        assert_eq!(first["type"], "connection_established");
        assert_eq!(first["data"]["scores"][0]["userId"], "alice");
        assert_eq!(first["data"]["scores"][0]["username"], "ALICE");

        let second = parse(&sub.recv().await.unwrap());
        assert_eq!(second["type"], "scoreboard_update");
    }

    #[tokio::test]
    async fn test_initial_snapshot_on_empty_board() {
        let fx = fixture(BroadcastConfig::default());
        let mut sub = fx.broadcaster.subscribe().await.unwrap();

        let message = parse(&sub.recv().await.unwrap());
        assert_eq!(message["type"], "connection_established");
        assert_eq!(message["data"]["scores"].as_array().unwrap().len(), 0);
        assert_eq!(message["data"]["totalPlayers"], 0);
    }

    #[tokio::test]
    async fn test_publish_reaches_every_subscriber_with_same_payload() {
        let fx = fixture(BroadcastConfig::default());
        let mut a = fx.broadcaster.subscribe().await.unwrap();
        let mut b = fx.broadcaster.subscribe().await.unwrap();
        a.recv().await.unwrap();
        b.recv().await.unwrap();

        bump(&fx.store, "alice", 10);
        let report = fx.broadcaster.publish().await.unwrap();
        assert_eq!(report.delivered, 2);
        assert!(report.dropped.is_empty());

        let from_a = a.recv().await.unwrap();
        let from_b = b.recv().await.unwrap();
        assert_eq!(from_a, from_b);
        assert_eq!(parse(&from_a)["data"]["scores"][0]["score"], 10);
    }

    #[tokio::test]
    async fn test_snapshot_respects_top_k() {
        let fx = fixture(BroadcastConfig {
            top_k: 3,
            ..Default::default()
        });
        for (i, user) in ["a", "b", "c", "d", "e"].iter().enumerate() {
            bump(&fx.store, user, (i as u64 + 1) * 10);
        }

        let mut sub = fx.broadcaster.subscribe().await.unwrap();
        let message = parse(&sub.recv().await.unwrap());
        let scores = message["data"]["scores"].as_array().unwrap();
        assert_eq!(scores.len(), 3);
        assert_eq!(scores[0]["userId"], "e");
        assert_eq!(scores[0]["rank"], 1);
        assert_eq!(scores[2]["rank"], 3);
        assert_eq!(message["data"]["totalPlayers"], 5);
    }

    #[tokio::test]
    async fn test_closed_subscriber_is_dropped_others_still_receive() {
        let fx = fixture(BroadcastConfig::default());
        let mut live = fx.broadcaster.subscribe().await.unwrap();
        live.recv().await.unwrap();

        let (tx, rx) = mpsc::channel(4);
        drop(rx);
        let dead = fx.broadcaster.registry().register(tx);

        let report = fx.broadcaster.publish().await.unwrap();
        assert_eq!(report.delivered, 1);
        assert_eq!(report.dropped, vec![dead]);
        assert!(!fx.broadcaster.registry().contains(dead));
        assert!(fx.broadcaster.registry().contains(live.id()));

        let message = parse(&live.recv().await.unwrap());
        assert_eq!(message["type"], "scoreboard_update");
    }

    #[tokio::test]
    async fn test_stalled_subscriber_times_out_and_is_dropped() {
        let fx = fixture(BroadcastConfig {
            send_timeout: Duration::from_millis(20),
            channel_capacity: 1,
            ..Default::default()
        });

        // initial sync fills the single slot and is never read
        let stalled = fx.broadcaster.subscribe().await.unwrap();
        let mut live = fx.broadcaster.subscribe().await.unwrap();
        live.recv().await.unwrap();

        let report = fx.broadcaster.publish().await.unwrap();
        assert_eq!(report.delivered, 1);
        assert_eq!(report.dropped, vec![stalled.id()]);
        assert_eq!(fx.broadcaster.registry().len(), 1);

        assert!(live.recv().await.is_some());
    }

    #[tokio::test]
    async fn test_dropping_subscription_unregisters() {
        let fx = fixture(BroadcastConfig::default());
        let sub = fx.broadcaster.subscribe().await.unwrap();
        let id = sub.id();
        assert_eq!(fx.broadcaster.registry().len(), 1);

        drop(sub);
        assert!(!fx.broadcaster.registry().contains(id));

        let report = fx.broadcaster.publish().await.unwrap();
        assert_eq!(report, PublishReport::default());
    }

    #[tokio::test]
    async fn test_publish_with_no_subscribers() {
        let fx = fixture(BroadcastConfig::default());
        bump(&fx.store, "alice", 1);

        let report = fx.broadcaster.publish().await.unwrap();
        assert_eq!(report.delivered, 0);
        assert!(report.dropped.is_empty());
    }

    #[tokio::test]
    async fn test_publish_racing_subscribe_still_reaches_observer() {
        let store = Arc::new(MemoryStore::new());
        bump(&store, "alice", 10);

        let (taken_tx, taken_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel();
        let source = GatedSource {
            inner: RankEngine::new(store.clone(), store.clone()),
            gate: SyncMutex::new(Some((taken_tx, release_rx))),
        };
        let broadcaster = Arc::new(Broadcaster::new(
            Arc::new(SubscriberRegistry::new()),
            Arc::new(source),
            BroadcastConfig::default(),
        ));

        let subscribing = tokio::spawn({
            let broadcaster = broadcaster.clone();
            async move { broadcaster.subscribe().await }
        });
        // the initial snapshot (score 10) is taken, registration is pending
        taken_rx.await.unwrap();

        bump(&store, "alice", 10);
        let publishing = tokio::spawn({
            let broadcaster = broadcaster.clone();
            async move { broadcaster.publish().await }
        });
        tokio::task::yield_now().await;
        release_tx.send(()).unwrap();

        let mut sub = subscribing.await.unwrap().unwrap();
        let report = publishing.await.unwrap().unwrap();
        assert_eq!(report.delivered, 1);

        let first = parse(&sub.recv().await.unwrap());
        assert_eq!(first["type"], "connection_established");
        assert_eq!(first["data"]["scores"][0]["score"], 10);

        let second = parse(&sub.recv().await.unwrap());
        assert_eq!(second["type"], "scoreboard_update");
        assert_eq!(second["data"]["scores"][0]["score"], 20);
    }
}
