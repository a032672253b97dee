//! Broadcast Metrics

use metrics::{Counter, Gauge};

/// Broadcast Metrics
#[derive(Clone, Debug)]
pub(crate) struct BroadcastMetrics {
    /// Number of published scoreboard updates
    pub(crate) publish_total: Counter,
    /// Number of payloads handed to subscriber channels
    pub(crate) deliveries_total: Counter,
    /// Number of subscribers dropped after a failed send
    pub(crate) delivery_failures_total: Counter,
}

impl Default for BroadcastMetrics {
    fn default() -> Self {
        Self {
            publish_total: metrics::counter!("podium.broadcast.publish_total"),
            deliveries_total: metrics::counter!("podium.broadcast.deliveries_total"),
            delivery_failures_total: metrics::counter!(
                "podium.broadcast.delivery_failures_total"
            ),
        }
    }
}

impl BroadcastMetrics {
    pub(crate) fn record_publish(&self, delivered: usize, failed: usize) {
        self.publish_total.increment(1);
        self.deliveries_total.increment(delivered as u64);
        self.delivery_failures_total.increment(failed as u64);
    }
}

/// Current number of registered subscribers.
pub(crate) fn subscribers_gauge() -> Gauge {
    metrics::gauge!("podium.broadcast.subscribers")
}
