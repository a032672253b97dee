//! Registry of connected scoreboard observers.

use std::{
    collections::HashMap,
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use metrics::Gauge;
use parking_lot::RwLock;
use tokio::sync::mpsc;

use crate::metrics::subscribers_gauge;

/// A serialized scoreboard message, shared by every subscriber.
pub type Payload = Arc<str>;

/// Handle identifying one registered subscriber.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Subscriber set (all operations RwLock-protected).
///
/// Broadcasts iterate over a copy taken by [`senders`](Self::senders), so
/// registering or unregistering mid-broadcast never blocks on delivery and
/// never disturbs the iteration in progress.
pub struct SubscriberRegistry {
    subscribers: RwLock<HashMap<SubscriptionId, mpsc::Sender<Payload>>>,
    next_id: AtomicU64,
    gauge: Gauge,
}

impl Default for SubscriberRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SubscriberRegistry {
    pub fn new() -> Self {
        Self {
            subscribers: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(0),
            gauge: subscribers_gauge(),
        }
    }

    /// Add a channel to the active set.
    pub fn register(&self, sender: mpsc::Sender<Payload>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut subscribers = self.subscribers.write();
        subscribers.insert(id, sender);
        self.gauge.set(subscribers.len() as f64);
        id
    }

    /// Remove a channel. Returns `false` if it was already gone.
    pub fn unregister(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.write();
        let removed = subscribers.remove(&id).is_some();
        if removed {
            self.gauge.set(subscribers.len() as f64);
        }
        removed
    }

    pub fn contains(&self, id: SubscriptionId) -> bool {
        self.subscribers.read().contains_key(&id)
    }

    /// Copy of the current subscriber set.
    pub fn senders(&self) -> Vec<(SubscriptionId, mpsc::Sender<Payload>)> {
        self.subscribers
            .read()
            .iter()
            .map(|(id, tx)| (*id, tx.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.subscribers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for SubscriberRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriberRegistry")
            .field("subscribers", &self.len())
            .finish()
    }
}
