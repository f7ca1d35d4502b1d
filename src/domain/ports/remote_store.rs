//! Remote store port (trait) for dependency injection.
//!
//! One row per identity: `(identity_id, display_name, highest_level,
//! best_score, updated_at)`.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Identity, LeaderboardEntry, PersistedProgress};

/// Remote persistence of progress, shared across machines.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Fetch the progress stored for an identity.
    ///
    /// # Returns
    /// - `Some(PersistedProgress)` if a row exists
    /// - `None` if the identity has never synced
    async fn fetch_progress(&self, identity_id: &str) -> DomainResult<Option<PersistedProgress>>;

    /// Insert or replace the row for an identity.
    async fn upsert_progress(&self, identity: &Identity, progress: &PersistedProgress) -> DomainResult<()>;

    /// Top rows ordered by highest level, then best score.
    async fn leaderboard(&self, limit: usize) -> DomainResult<Vec<LeaderboardEntry>>;
}
