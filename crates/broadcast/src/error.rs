//! Broadcast error types.

use std::time::Duration;

use podium_storage::StoreError;

/// A single subscriber could not be reached.
///
/// Never surfaced to the caller that caused the broadcast.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    #[error("subscriber channel closed")]
    Closed,

    #[error("send timed out after {0:?}")]
    Timeout(Duration),
}

/// Errors building or delivering a scoreboard message.
#[derive(Debug, thiserror::Error)]
pub enum BroadcastError {
    #[error("failed to build snapshot: {0}")]
    Snapshot(#[from] StoreError),

    #[error("failed to encode scoreboard message: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    #[error("snapshot task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
