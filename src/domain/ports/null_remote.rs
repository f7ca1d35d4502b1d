//! Null remote store implementation.
//!
//! Used when remote sync is not configured. Reads find nothing and writes
//! report the store as unavailable.

use async_trait::async_trait;

use super::RemoteStore;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Identity, LeaderboardEntry, PersistedProgress};

/// A remote store that is never reachable.
#[derive(Debug, Clone, Default)]
pub struct NullRemoteStore;

impl NullRemoteStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl RemoteStore for NullRemoteStore {
    async fn fetch_progress(&self, _identity_id: &str) -> DomainResult<Option<PersistedProgress>> {
        Ok(None)
    }

    async fn upsert_progress(&self, _identity: &Identity, _progress: &PersistedProgress) -> DomainResult<()> {
        Err(DomainError::RemoteUnavailable("remote sync is not configured".to_string()))
    }

    async fn leaderboard(&self, _limit: usize) -> DomainResult<Vec<LeaderboardEntry>> {
        Err(DomainError::RemoteUnavailable("remote sync is not configured".to_string()))
    }
}
