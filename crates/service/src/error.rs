//! Service error types.

use podium_primitives::{UserId, ValidationError};
use podium_storage::StoreError;

/// Errors returned by [`ScoreService`](crate::ScoreService).
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The increment was rejected before any mutation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("User score not found")]
    NotFound(UserId),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}
