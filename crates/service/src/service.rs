//! Score mutation and scoreboard queries.

use std::sync::Arc;

use podium_broadcast::UpdateNotifier;
use podium_primitives::{
    DEFAULT_MAX_INCREMENT, DEFAULT_TOP_K, Identity, Increment, RankedEntry, ScoreboardSnapshot,
    UserId,
};
use podium_rank::RankEngine;
use podium_storage::ScoreStore;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{ServiceError, metrics::ServiceMetrics, parse_increment};

/// Score service settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Largest increment accepted per request.
    pub max_increment: u64,
    /// Length of the scoreboard returned by [`ScoreService::top_scores`].
    pub top_k: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_increment: DEFAULT_MAX_INCREMENT,
            top_k: DEFAULT_TOP_K,
        }
    }
}

/// Result of a successful increment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreUpdate {
    pub user_id: UserId,
    pub previous_score: u64,
    pub new_score: u64,
    /// `None` when the rank could not be computed after the commit.
    pub rank: Option<u64>,
}

/// Applies score increments and answers scoreboard queries.
pub struct ScoreService {
    store: Arc<dyn ScoreStore>,
    ranks: Arc<RankEngine>,
    notifier: Arc<dyn UpdateNotifier>,
    config: ServiceConfig,
    metrics: ServiceMetrics,
}

impl ScoreService {
    pub fn new(
        store: Arc<dyn ScoreStore>,
        ranks: Arc<RankEngine>,
        notifier: Arc<dyn UpdateNotifier>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            store,
            ranks,
            notifier,
            config,
            metrics: ServiceMetrics::default(),
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Validate a raw `increment` value and apply it for `identity`.
    ///
    /// Nothing is mutated or broadcast when validation fails.
    pub fn apply_increment(
        &self,
        identity: &Identity,
        raw: Option<&Value>,
    ) -> Result<ScoreUpdate, ServiceError> {
        let increment = parse_increment(raw, self.config.max_increment).inspect_err(|error| {
            self.metrics.rejected_total.increment(1);
            debug!(user = %identity.user_id, %error, "Rejected increment");
        })?;
        self.increment(identity, increment)
    }

    /// Apply an already validated increment.
    ///
    /// Once the increment has committed this never fails: a rank that cannot
    /// be computed is reported as `None` so a retrying client does not apply
    /// the increment twice.
    pub fn increment(
        &self,
        identity: &Identity,
        increment: Increment,
    ) -> Result<ScoreUpdate, ServiceError> {
        let user = &identity.user_id;

        let updated = self.store.record_increment(identity, increment)?;
        // Derived from the atomic update so concurrent increments never
        // report the same previous score.
        let previous_score = updated.score.saturating_sub(increment.get());
        self.metrics.increments_total.increment(1);

        let rank = self.ranks.rank_of(user).unwrap_or_else(|error| {
            warn!(%user, %error, "Rank unavailable after score update");
            None
        });
        self.notifier.notify_update();

        info!(
            %user,
            increment = increment.get(),
            score = updated.score,
            ?rank,
            "Score updated"
        );

        Ok(ScoreUpdate {
            user_id: user.clone(),
            previous_score,
            new_score: updated.score,
            rank,
        })
    }

    /// The configured top-K plus the total player count.
    pub fn top_scores(&self) -> Result<ScoreboardSnapshot, ServiceError> {
        Ok(self.ranks.snapshot(self.config.top_k)?)
    }

    /// A single user's score and rank.
    pub fn user_score(&self, user: &UserId) -> Result<RankedEntry, ServiceError> {
        self.ranks
            .entry(user)?
            .ok_or_else(|| ServiceError::NotFound(user.clone()))
    }
}

impl std::fmt::Debug for ScoreService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoreService")
            .field("ranks", &self.ranks)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
