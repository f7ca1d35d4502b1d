//! Progress reconciliation between the local and remote stores.
//!
//! The local store is authoritative and always written first. The remote
//! store is consulted only when an identity is authenticated; its failures
//! are reported back to the caller as [`RemoteSync::Failed`] and never
//! touch the local record.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::errors::DomainResult;
use crate::domain::models::session::{clamp_level, MIN_LEVEL};
use crate::domain::models::{
    GameMode, Identity, LeaderboardEntry, PersistedProgress, ProgressUpdate,
};
use crate::domain::ports::{IdentityProvider, LocalStore, NullRemoteStore, RemoteStore, StaticIdentity, StoreKey};

/// What happened on the remote side of a progress operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum RemoteSync {
    /// No identity, manual mode, or an update the remote never receives.
    Skipped,
    Synced,
    /// The remote call failed; the message is meant for the player.
    Failed(String),
}

impl RemoteSync {
    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Result of a progress write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitReport {
    /// The local record after the write.
    pub local: PersistedProgress,
    pub remote: RemoteSync,
}

/// Parse a stored level. Values that are missing default to 1; values that
/// are unparsable or not positive are corrupt and reset to 1.
fn decode_level(key: StoreKey, raw: Option<&str>) -> (u32, bool) {
    let Some(raw) = raw else {
        return (MIN_LEVEL, false);
    };
    match raw.trim().parse::<i64>() {
        Ok(value) if value >= i64::from(MIN_LEVEL) => (clamp_level(value), false),
        _ => {
            warn!(key = key.as_str(), value = raw, "corrupt stored level, resetting to 1");
            (MIN_LEVEL, true)
        }
    }
}

fn decode_score(raw: Option<&str>) -> (u32, bool) {
    let Some(raw) = raw else {
        return (0, false);
    };
    match raw.trim().parse::<u32>() {
        Ok(value) => (value, false),
        Err(_) => {
            warn!(key = StoreKey::BestScore.as_str(), value = raw, "corrupt stored score, resetting to 0");
            (0, true)
        }
    }
}

pub struct ProgressService {
    local: Arc<dyn LocalStore>,
    remote: Arc<dyn RemoteStore>,
    identity: Arc<dyn IdentityProvider>,
}

impl ProgressService {
    pub fn new(
        local: Arc<dyn LocalStore>,
        remote: Arc<dyn RemoteStore>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            local,
            remote,
            identity,
        }
    }

    /// Progress kept on this machine only.
    pub fn local_only(local: Arc<dyn LocalStore>) -> Self {
        Self::new(local, Arc::new(NullRemoteStore::new()), Arc::new(StaticIdentity::anonymous()))
    }

    pub fn identity(&self) -> Option<Identity> {
        self.identity.authenticated_identity()
    }

    /// Load the local record, repairing corrupt values in place.
    pub async fn load_local(&self) -> DomainResult<PersistedProgress> {
        Ok(self.load_local_record().await?.0)
    }

    /// Local record plus whether a current level was ever saved here.
    async fn load_local_record(&self) -> DomainResult<(PersistedProgress, bool)> {
        let saved = self.local.get(StoreKey::SavedLevel).await?;
        let highest = self.local.get(StoreKey::HighestLevel).await?;
        let best = self.local.get(StoreKey::BestScore).await?;

        let (current_level, saved_corrupt) = decode_level(StoreKey::SavedLevel, saved.as_deref());
        let (highest_level, highest_corrupt) = decode_level(StoreKey::HighestLevel, highest.as_deref());
        let (best_score, best_corrupt) = decode_score(best.as_deref());

        let progress = PersistedProgress::new(current_level, highest_level, best_score);
        if saved_corrupt || highest_corrupt || best_corrupt {
            self.save_local(&progress).await?;
        }
        Ok((progress, saved.is_some()))
    }

    pub async fn save_local(&self, progress: &PersistedProgress) -> DomainResult<()> {
        self.local
            .set(StoreKey::SavedLevel, &progress.current_level.to_string())
            .await?;
        self.local
            .set(StoreKey::HighestLevel, &progress.highest_level_reached.to_string())
            .await?;
        self.local
            .set(StoreKey::BestScore, &progress.best_score.to_string())
            .await?;
        debug!(
            level = progress.current_level,
            highest = progress.highest_level_reached,
            best = progress.best_score,
            "saved local progress"
        );
        Ok(())
    }

    /// Load local progress and reconcile it with the remote record.
    ///
    /// The merged record is written back locally so the next load sees it.
    /// The remote row only sets the current level on a machine that has
    /// never saved one, so a local level-down is kept.
    pub async fn load_effective(&self) -> DomainResult<(PersistedProgress, RemoteSync)> {
        let (local, level_saved) = self.load_local_record().await?;
        let Some(identity) = self.identity() else {
            return Ok((local, RemoteSync::Skipped));
        };

        match self.remote.fetch_progress(&identity.id).await {
            Ok(remote) => {
                let merged = PersistedProgress::merge_remote_row(local, remote, level_saved);
                if merged != local {
                    info!(
                        identity = %identity.id,
                        level = merged.current_level,
                        best = merged.best_score,
                        "adopted remote progress"
                    );
                    self.save_local(&merged).await?;
                }
                Ok((merged, RemoteSync::Synced))
            }
            Err(err) => {
                warn!(identity = %identity.id, error = %err, "remote progress unavailable, using local");
                Ok((local, RemoteSync::Failed(err.to_string())))
            }
        }
    }

    /// Merge an observed `(level, score)` into the stored progress.
    ///
    /// The local write happens first and unconditionally. The remote row is
    /// updated only for adaptive sessions with an authenticated identity.
    pub async fn commit(&self, level: u32, score: u32, mode: GameMode) -> DomainResult<CommitReport> {
        let persisted = self.load_local().await?;
        let next = persisted.apply_commit(level, score);
        if next == persisted && level < persisted.current_level {
            debug!(level, stored = persisted.current_level, "lower-level commit ignored");
        }
        self.save_local(&next).await?;

        let remote = if mode == GameMode::Adaptive {
            self.push_remote(level, score, &next).await
        } else {
            RemoteSync::Skipped
        };

        info!(level, score, stored_level = next.current_level, best = next.best_score, "committed progress");
        Ok(CommitReport { local: next, remote })
    }

    async fn push_remote(&self, level: u32, score: u32, local: &PersistedProgress) -> RemoteSync {
        let Some(identity) = self.identity() else {
            return RemoteSync::Skipped;
        };

        let base = match self.remote.fetch_progress(&identity.id).await {
            Ok(remote) => remote.unwrap_or_default(),
            Err(err) => {
                warn!(identity = %identity.id, error = %err, "remote fetch failed, progress kept locally");
                return RemoteSync::Failed(err.to_string());
            }
        };

        let updated = PersistedProgress::merge(base.apply_commit(level, score), Some(*local));
        match self.remote.upsert_progress(&identity, &updated).await {
            Ok(()) => RemoteSync::Synced,
            Err(err) => {
                warn!(identity = %identity.id, error = %err, "remote upsert failed, progress kept locally");
                RemoteSync::Failed(err.to_string())
            }
        }
    }

    /// Lower the local level after a failed session. The best score is not
    /// touched and nothing is sent remotely.
    pub async fn record_level_down(&self, level: u32) -> DomainResult<CommitReport> {
        let persisted = self.load_local().await?;
        let next = persisted.apply_level_down(level);
        self.save_local(&next).await?;
        info!(from = persisted.current_level, to = next.current_level, "recorded level down");
        Ok(CommitReport {
            local: next,
            remote: RemoteSync::Skipped,
        })
    }

    /// Apply a write requested by the trial engine.
    pub async fn apply(&self, update: ProgressUpdate, mode: GameMode) -> DomainResult<CommitReport> {
        match update {
            ProgressUpdate::Commit { level, score } => self.commit(level, score, mode).await,
            ProgressUpdate::LevelDown { level } => self.record_level_down(level).await,
        }
    }

    /// Restore the local progress defaults.
    pub async fn reset(&self) -> DomainResult<()> {
        for key in StoreKey::PROGRESS {
            self.local.remove(key).await?;
        }
        info!("local progress reset");
        Ok(())
    }

    /// Remote leaderboard. Fails with a displayable error when no remote
    /// store is configured.
    pub async fn leaderboard(&self, limit: usize) -> DomainResult<Vec<LeaderboardEntry>> {
        self.remote.leaderboard(limit).await
    }
}
