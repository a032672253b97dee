//! The receiving end of a scoreboard subscription.

use std::sync::Arc;

use tokio::sync::mpsc::{self, error::TryRecvError};

use crate::{Payload, SubscriberRegistry, SubscriptionId};

/// A registered observer.
///
/// Dropping the subscription removes it from the registry, so a connection
/// task that exits for any reason cannot leave a dead entry behind.
pub struct Subscription {
    id: SubscriptionId,
    receiver: mpsc::Receiver<Payload>,
    registry: Arc<SubscriberRegistry>,
}

impl Subscription {
    pub(crate) fn new(
        id: SubscriptionId,
        receiver: mpsc::Receiver<Payload>,
        registry: Arc<SubscriberRegistry>,
    ) -> Self {
        Self {
            id,
            receiver,
            registry,
        }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Wait for the next message. `None` once the subscriber was dropped
    /// from the registry and everything queued has been read.
    pub async fn recv(&mut self) -> Option<Payload> {
        self.receiver.recv().await
    }

    pub fn try_recv(&mut self) -> Result<Payload, TryRecvError> {
        self.receiver.try_recv()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.registry.unregister(self.id);
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
