//! Score Service Metrics

use metrics::Counter;

/// Score Service Metrics
#[derive(Clone, Debug)]
pub(crate) struct ServiceMetrics {
    /// Number of applied increments
    pub(crate) increments_total: Counter,
    /// Number of increments rejected by validation
    pub(crate) rejected_total: Counter,
}

impl Default for ServiceMetrics {
    fn default() -> Self {
        Self {
            increments_total: metrics::counter!("podium.scores.increments_total"),
            rejected_total: metrics::counter!("podium.scores.rejected_total"),
        }
    }
}
