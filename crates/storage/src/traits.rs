//! Storage backend traits.
//!
//! [`ScoreStore`] and [`UserDirectory`] abstract over the storage engine so
//! the ranking and service layers never see redb or in-memory details.

use podium_primitives::{Identity, Increment, ScoreRecord, UserId};

use crate::StoreResult;

/// Durable mapping from user to current score.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (Send + Sync). Concurrent
/// [`apply_increment`](ScoreStore::apply_increment) calls for the same user
/// must never lose an update.
pub trait ScoreStore: Send + Sync {
    /// Get a user's record. Returns `None` if the user never scored.
    fn get(&self, user: &UserId) -> StoreResult<Option<ScoreRecord>>;

    /// Add `increment` to the user's score, creating the record if absent.
    ///
    /// A new record gets `score = increment` and the next creation sequence
    /// number. The read-modify-write is atomic per user; on error nothing
    /// is written.
    fn apply_increment(&self, user: &UserId, increment: Increment) -> StoreResult<ScoreRecord>;

    /// [`apply_increment`](ScoreStore::apply_increment) for a verified
    /// identity, storing its username in the same write.
    ///
    /// Either both the score and the username are written or neither is.
    fn record_increment(
        &self,
        identity: &Identity,
        increment: Increment,
    ) -> StoreResult<ScoreRecord>;

    /// Number of users with a record.
    fn total_count(&self) -> StoreResult<u64>;

    /// All records, in no particular order.
    fn scan(&self) -> StoreResult<Vec<ScoreRecord>>;
}

/// Display names for users, as supplied by the identity provider.
pub trait UserDirectory: Send + Sync {
    /// Get the last known username for a user.
    fn username(&self, user: &UserId) -> StoreResult<Option<String>>;

    /// Remember the username carried by a verified identity.
    fn record_username(&self, identity: &Identity) -> StoreResult<()>;
}
