//! redb-based score storage backend.
//!
//! This module provides [`RedbStore`], a persistent score store and user
//! directory backed by the redb embedded database.

use std::path::Path;

use chrono::{DateTime, Utc};
use podium_primitives::{Identity, Increment, ScoreRecord, UserId};
use redb::{Database, ReadableTable, ReadableTableMetadata, TableDefinition, WriteTransaction};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{ScoreStore, StoreResult, UserDirectory};

/// Table definition for scores.
/// Key: user id
/// Value: postcard-encoded [`StoredScore`]
const SCORES_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("scores");

/// Table definition for usernames.
const USERS_TABLE: TableDefinition<&str, &str> = TableDefinition::new("users");

/// Store-wide counters.
const META_TABLE: TableDefinition<&str, u64> = TableDefinition::new("meta");

const NEXT_SEQ_KEY: &str = "next_seq";

/// On-disk score row. The user id lives in the key.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct StoredScore {
    score: u64,
    seq: u64,
    updated_at_ms: i64,
}

impl StoredScore {
    fn decode(bytes: &[u8]) -> StoreResult<Self> {
        Ok(postcard::from_bytes(bytes)?)
    }

    fn encode(&self) -> StoreResult<Vec<u8>> {
        Ok(postcard::to_allocvec(self)?)
    }

    fn into_record(self, user_id: UserId) -> ScoreRecord {
        ScoreRecord {
            user_id,
            score: self.score,
            updated_at: DateTime::from_timestamp_millis(self.updated_at_ms).unwrap_or_default(),
            seq: self.seq,
        }
    }
}

/// redb-based score store.
///
/// Every increment runs in its own write transaction. redb serializes
/// write transactions, so the read-modify-write can never interleave with
/// another increment and a failed commit leaves no partial state.
pub struct RedbStore {
    db: Database,
}

impl RedbStore {
    /// Open or create a store at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let db = Database::create(path)?;

        // Ensure all tables exist so read transactions never miss one
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(SCORES_TABLE)?;
            let _ = write_txn.open_table(USERS_TABLE)?;
            let _ = write_txn.open_table(META_TABLE)?;
        }
        write_txn.commit()?;

        debug!("Opened redb score store");
        Ok(Self { db })
    }
}

impl std::fmt::Debug for RedbStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedbStore").finish_non_exhaustive()
    }
}

impl ScoreStore for RedbStore {
    fn get(&self, user: &UserId) -> StoreResult<Option<ScoreRecord>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SCORES_TABLE)?;
        match table.get(user.as_str())? {
            Some(value) => Ok(Some(
                StoredScore::decode(value.value())?.into_record(user.clone()),
            )),
            None => Ok(None),
        }
    }

    fn apply_increment(&self, user: &UserId, increment: Increment) -> StoreResult<ScoreRecord> {
        let write_txn = self.db.begin_write()?;
        let stored = increment_in(&write_txn, user, increment)?;
        write_txn.commit()?;

        Ok(stored.into_record(user.clone()))
    }

    fn record_increment(
        &self,
        identity: &Identity,
        increment: Increment,
    ) -> StoreResult<ScoreRecord> {
        let user = &identity.user_id;
        let write_txn = self.db.begin_write()?;
        let stored = increment_in(&write_txn, user, increment)?;
        {
            let mut users = write_txn.open_table(USERS_TABLE)?;
            users.insert(user.as_str(), identity.username.as_str())?;
        }
        write_txn.commit()?;

        Ok(stored.into_record(user.clone()))
    }

    fn total_count(&self) -> StoreResult<u64> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SCORES_TABLE)?;
        Ok(table.len()?)
    }

    fn scan(&self) -> StoreResult<Vec<ScoreRecord>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(SCORES_TABLE)?;

        let mut records = Vec::new();
        for entry in table.iter()? {
            let (key, value) = entry?;
            let stored = StoredScore::decode(value.value())?;
            records.push(stored.into_record(UserId::from(key.value())));
        }
        Ok(records)
    }
}

/// Read-modify-write of one score row inside an open write transaction.
fn increment_in(
    write_txn: &WriteTransaction,
    user: &UserId,
    increment: Increment,
) -> StoreResult<StoredScore> {
    let now_ms = Utc::now().timestamp_millis();
    let mut scores = write_txn.open_table(SCORES_TABLE)?;
    let existing = match scores.get(user.as_str())? {
        Some(value) => Some(StoredScore::decode(value.value())?),
        None => None,
    };

    let stored = match existing {
        Some(current) => StoredScore {
            score: current.score.saturating_add(increment.get()),
            seq: current.seq,
            updated_at_ms: now_ms,
        },
        None => {
            let mut meta = write_txn.open_table(META_TABLE)?;
            let seq = meta.get(NEXT_SEQ_KEY)?.map(|v| v.value()).unwrap_or(0);
            meta.insert(NEXT_SEQ_KEY, seq + 1)?;
            StoredScore {
                score: increment.get(),
                seq,
                updated_at_ms: now_ms,
            }
        }
    };

    let bytes = stored.encode()?;
    scores.insert(user.as_str(), bytes.as_slice())?;
    Ok(stored)
}

impl UserDirectory for RedbStore {
    fn username(&self, user: &UserId) -> StoreResult<Option<String>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(USERS_TABLE)?;
        Ok(table.get(user.as_str())?.map(|v| v.value().to_string()))
    }

    fn record_username(&self, identity: &Identity) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(USERS_TABLE)?;
            table.insert(identity.user_id.as_str(), identity.username.as_str())?;
        }
        write_txn.commit()?;
        Ok(())
    }
}
