//! Leaderboard ranking.
//!
//! [`RankEngine`] reads every record from a [`ScoreStore`] and orders them by
//! [`standing_order`]: score descending, ties won by the user whose record was
//! created first. All queries are answered from a single scan, so a top-K list
//! and a rank lookup taken from the same [`Standings`] always agree.
//!
//! Each call is a full scan and sort, `O(n log n)` in the number of players.
//! An incrementally maintained ordered index could replace the scan without
//! changing this interface.

use std::{collections::HashMap, sync::Arc};

use podium_primitives::{
    RankedEntry, ScoreRecord, ScoreboardSnapshot, UserId, standing_order,
};
use podium_storage::{ScoreStore, StoreResult, UserDirectory};
use tracing::trace;

/// Ranks users by score, joining display names from a [`UserDirectory`].
pub struct RankEngine {
    store: Arc<dyn ScoreStore>,
    directory: Arc<dyn UserDirectory>,
}

impl RankEngine {
    pub fn new(store: Arc<dyn ScoreStore>, directory: Arc<dyn UserDirectory>) -> Self {
        Self { store, directory }
    }

    /// Take one scan of the store and order it.
    pub fn standings(&self) -> StoreResult<Standings> {
        let records = self.store.scan()?;
        trace!(players = records.len(), "Computed standings");
        Ok(Standings::from_records(records))
    }

    /// The first `k` users in leaderboard order.
    pub fn top_k(&self, k: usize) -> StoreResult<Vec<RankedEntry>> {
        let standings = self.standings()?;
        self.join_top(&standings, k)
    }

    /// 1-based rank of `user`, or `None` if the user has no record.
    ///
    /// Counts the records placed ahead of the user instead of sorting, which
    /// yields the same position [`top_k`](Self::top_k) would.
    pub fn rank_of(&self, user: &UserId) -> StoreResult<Option<u64>> {
        let records = self.store.scan()?;
        let Some(target) = records.iter().find(|r| &r.user_id == user) else {
            return Ok(None);
        };
        let ahead = records.iter().filter(|r| r.ranks_ahead_of(target)).count();
        Ok(Some(ahead as u64 + 1))
    }

    /// A single user's ranked entry, or `None` if the user has no record.
    pub fn entry(&self, user: &UserId) -> StoreResult<Option<RankedEntry>> {
        let standings = self.standings()?;
        let Some((rank, record)) = standings.position(user) else {
            return Ok(None);
        };
        Ok(Some(self.join(record, rank)?))
    }

    /// Top `k` entries plus the total number of players, from one scan.
    pub fn snapshot(&self, k: usize) -> StoreResult<ScoreboardSnapshot> {
        let standings = self.standings()?;
        let scores = self.join_top(&standings, k)?;
        Ok(ScoreboardSnapshot::new(scores, standings.len() as u64))
    }

    fn join_top(&self, standings: &Standings, k: usize) -> StoreResult<Vec<RankedEntry>> {
        standings
            .top(k)
            .iter()
            .zip(1u64..)
            .map(|(record, rank)| self.join(record, rank))
            .collect()
    }

    fn join(&self, record: &ScoreRecord, rank: u64) -> StoreResult<RankedEntry> {
        // Never drop an entry for a missing name, ranks must stay contiguous
        let username = self
            .directory
            .username(&record.user_id)?
            .unwrap_or_else(|| record.user_id.to_string());
        Ok(RankedEntry {
            user_id: record.user_id.clone(),
            username,
            score: record.score,
            rank,
            updated_at: record.updated_at,
        })
    }
}

impl std::fmt::Debug for RankEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RankEngine").finish_non_exhaustive()
    }
}

/// An ordered, immutable view of every record from one store scan.
#[derive(Debug, Clone)]
pub struct Standings {
    ordered: Vec<ScoreRecord>,
    index: HashMap<UserId, usize>,
}

impl Standings {
    pub fn from_records(mut records: Vec<ScoreRecord>) -> Self {
        records.sort_by(standing_order);
        let index = records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.user_id.clone(), i))
            .collect();
        Self {
            ordered: records,
            index,
        }
    }

    /// The first `k` records, fewer if there are not enough players.
    pub fn top(&self, k: usize) -> &[ScoreRecord] {
        let end = k.min(self.ordered.len());
        self.ordered.get(..end).unwrap_or_default()
    }

    /// 1-based rank of `user`.
    pub fn rank_of(&self, user: &UserId) -> Option<u64> {
        self.index.get(user).map(|i| *i as u64 + 1)
    }

    /// Rank and record of `user`.
    pub fn position(&self, user: &UserId) -> Option<(u64, &ScoreRecord)> {
        let i = *self.index.get(user)?;
        self.ordered.get(i).map(|r| (i as u64 + 1, r))
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use podium_primitives::{Identity, Increment};
    use podium_storage::MemoryStore;

    use super::*;

    fn engine() -> (Arc<MemoryStore>, RankEngine) {
        let store = Arc::new(MemoryStore::new());
        let engine = RankEngine::new(store.clone(), store.clone());
        (store, engine)
    }

    fn add(store: &MemoryStore, id: &str, score: u64) {
        let user = UserId::from(id);
        let mut left = score;
        while left > 0 {
            let step = left.min(1000);
            store
                .apply_increment(&user, Increment::from_unsigned(step, 1000).unwrap())
                .unwrap();
            left -= step;
        }
    }

    #[test]
    fn test_tie_broken_by_creation_order() {
        let (store, engine) = engine();
        add(&store, "A", 50);
        add(&store, "B", 80);
        add(&store, "C", 80);

        let top = engine.top_k(10).unwrap();
        let order: Vec<_> = top.iter().map(|e| e.user_id.as_str()).collect();
        assert_eq!(order, vec!["B", "C", "A"]);
        assert_eq!(
            top.iter().map(|e| e.rank).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );

        assert_eq!(engine.rank_of(&UserId::from("A")).unwrap(), Some(3));
        assert_eq!(engine.rank_of(&UserId::from("B")).unwrap(), Some(1));
        assert_eq!(engine.rank_of(&UserId::from("C")).unwrap(), Some(2));
    }

    #[test]
    fn test_tie_goes_to_earlier_record_not_latest_update() {
        let (store, engine) = engine();
        add(&store, "early", 10);
        add(&store, "late", 30);
        // early catches up after late already has 30
        add(&store, "early", 20);

        let order: Vec<_> = engine
            .top_k(10)
            .unwrap()
            .into_iter()
            .map(|e| e.user_id.to_string())
            .collect();
        assert_eq!(order, vec!["early", "late"]);
    }

    #[test]
    fn test_rank_of_matches_top_k() {
        let (store, engine) = engine();
        for (i, id) in ["p0", "p1", "p2", "p3", "p4", "p5"].iter().enumerate() {
            add(&store, id, (i as u64 % 3 + 1) * 10);
        }

        let standings = engine.standings().unwrap();
        for entry in engine.top_k(10).unwrap() {
            assert_eq!(engine.rank_of(&entry.user_id).unwrap(), Some(entry.rank));
            assert_eq!(standings.rank_of(&entry.user_id), Some(entry.rank));
        }
    }

    #[test]
    fn test_rank_of_unknown_user() {
        let (store, engine) = engine();
        add(&store, "someone", 5);
        assert_eq!(engine.rank_of(&UserId::from("nobody")).unwrap(), None);
        assert_eq!(engine.entry(&UserId::from("nobody")).unwrap(), None);
    }

    #[test]
    fn test_snapshot_truncates_and_counts() {
        let (store, engine) = engine();
        for i in 0..15u64 {
            add(&store, &format!("user-{i:02}"), i + 1);
        }

        let snapshot = engine.snapshot(10).unwrap();
        assert_eq!(snapshot.scores().len(), 10);
        assert_eq!(snapshot.total_players(), 15);
        assert!(snapshot.is_well_formed());
        assert_eq!(snapshot.scores().first().unwrap().score, 15);
    }

    #[test]
    fn test_snapshot_with_fewer_players_than_k() {
        let (store, engine) = engine();
        add(&store, "solo", 1);

        let snapshot = engine.snapshot(10).unwrap();
        assert_eq!(snapshot.scores().len(), 1);
        assert_eq!(snapshot.total_players(), 1);
        assert!(snapshot.is_well_formed());

        let (_, empty) = self::engine();
        let snapshot = empty.snapshot(10).unwrap();
        assert!(snapshot.scores().is_empty());
        assert!(snapshot.is_well_formed());
    }

    #[test]
    fn test_reads_are_idempotent() {
        let (store, engine) = engine();
        add(&store, "x", 3);
        add(&store, "y", 9);

        assert_eq!(engine.top_k(10).unwrap(), engine.top_k(10).unwrap());
        assert_eq!(
            engine.rank_of(&UserId::from("x")).unwrap(),
            engine.rank_of(&UserId::from("x")).unwrap()
        );
    }

    #[test]
    fn test_usernames_joined_with_fallback() {
        let (store, engine) = engine();
        add(&store, "u-1", 5);
        add(&store, "u-2", 4);
        store
            .record_username(&Identity::new("u-1", "alice"))
            .unwrap();

        let top = engine.top_k(10).unwrap();
        assert_eq!(top.first().unwrap().username, "alice");
        assert_eq!(top.get(1).unwrap().username, "u-2");

        let entry = engine.entry(&UserId::from("u-2")).unwrap().unwrap();
        assert_eq!(entry.rank, 2);
        assert_eq!(entry.score, 4);
    }
}
