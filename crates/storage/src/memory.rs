//! In-memory store.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use dashmap::{DashMap, mapref::entry::Entry};
use podium_primitives::{Identity, Increment, ScoreRecord, UserId};

use crate::{ScoreStore, StoreResult, UserDirectory};

/// In-memory score store and user directory.
///
/// Each increment holds the map shard lock for its user while it
/// reads and writes, so increments for one user serialize while
/// increments for users in other shards run in parallel.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: DashMap<UserId, ScoreRecord>,
    usernames: DashMap<UserId, String>,
    next_seq: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, user: &UserId) -> StoreResult<Option<ScoreRecord>> {
        Ok(self.records.get(user).map(|r| r.value().clone()))
    }

    fn apply_increment(&self, user: &UserId, increment: Increment) -> StoreResult<ScoreRecord> {
        let now = Utc::now();
        let record = match self.records.entry(user.clone()) {
            Entry::Occupied(mut entry) => {
                let record = entry.get_mut();
                record.score = record.score.saturating_add(increment.get());
                record.updated_at = now;
                record.clone()
            }
            Entry::Vacant(entry) => {
                let record = ScoreRecord {
                    user_id: user.clone(),
                    score: increment.get(),
                    updated_at: now,
                    seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
                };
                entry.insert(record).value().clone()
            }
        };
        Ok(record)
    }

    fn record_increment(
        &self,
        identity: &Identity,
        increment: Increment,
    ) -> StoreResult<ScoreRecord> {
        // Neither write can fail. The name goes first so a ranked record
        // never lacks one.
        self.usernames
            .insert(identity.user_id.clone(), identity.username.clone());
        self.apply_increment(&identity.user_id, increment)
    }

    fn total_count(&self) -> StoreResult<u64> {
        Ok(self.records.len() as u64)
    }

    fn scan(&self) -> StoreResult<Vec<ScoreRecord>> {
        Ok(self.records.iter().map(|r| r.value().clone()).collect())
    }
}

impl UserDirectory for MemoryStore {
    fn username(&self, user: &UserId) -> StoreResult<Option<String>> {
        Ok(self.usernames.get(user).map(|name| name.value().clone()))
    }

    fn record_username(&self, identity: &Identity) -> StoreResult<()> {
        self.usernames
            .insert(identity.user_id.clone(), identity.username.clone());
        Ok(())
    }
}
