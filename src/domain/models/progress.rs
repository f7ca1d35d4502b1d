//! Persisted progress and the max-wins reconciliation rules.
//!
//! A [`PersistedProgress`] record lives in the local store and, for
//! authenticated users, in the remote store. The two copies are reconciled
//! with [`PersistedProgress::merge`] so that no stored progress ever
//! regresses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::session::MIN_LEVEL;

/// Durable per-user progress record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedProgress {
    pub current_level: u32,
    pub highest_level_reached: u32,
    /// Best score associated with `current_level`.
    pub best_score: u32,
}

impl Default for PersistedProgress {
    fn default() -> Self {
        Self {
            current_level: MIN_LEVEL,
            highest_level_reached: MIN_LEVEL,
            best_score: 0,
        }
    }
}

impl PersistedProgress {
    pub fn new(current_level: u32, highest_level_reached: u32, best_score: u32) -> Self {
        let current_level = current_level.max(MIN_LEVEL);
        Self {
            current_level,
            highest_level_reached: highest_level_reached.max(current_level),
            best_score,
        }
    }

    /// Reconcile a local record with an optional remote one.
    ///
    /// Every field is the maximum of its sources; the highest level reached
    /// is never below the effective current level.
    pub fn merge(local: Self, remote: Option<Self>) -> Self {
        let Some(remote) = remote else {
            return Self::new(local.current_level, local.highest_level_reached, local.best_score);
        };

        let current_level = local.current_level.max(remote.current_level).max(MIN_LEVEL);
        Self {
            current_level,
            highest_level_reached: local
                .highest_level_reached
                .max(remote.highest_level_reached)
                .max(current_level),
            best_score: local.best_score.max(remote.best_score),
        }
    }

    /// Reconcile local progress with the remote row.
    ///
    /// The remote row's level is a highest-level source. It stands in for
    /// the current level only when `local_level_saved` is false.
    pub fn merge_remote_row(local: Self, remote: Option<Self>, local_level_saved: bool) -> Self {
        let remote = remote.map(|row| {
            if local_level_saved {
                Self {
                    current_level: MIN_LEVEL,
                    ..row
                }
            } else {
                row
            }
        });
        Self::merge(local, remote)
    }

    /// Apply an observed `(level, score)` from a finished session.
    ///
    /// A higher level is adopted together with its score, an equal level can
    /// only raise the best score, and a lower level leaves level and score
    /// untouched.
    pub fn apply_commit(self, level: u32, score: u32) -> Self {
        let level = level.max(MIN_LEVEL);
        let mut next = self;
        if level > self.current_level {
            next.current_level = level;
            next.best_score = score;
        } else if level == self.current_level {
            next.best_score = self.best_score.max(score);
        }
        next.highest_level_reached = next.highest_level_reached.max(level).max(next.current_level);
        next
    }

    /// Lower the current level after a failed session. The best score and the
    /// highest level reached are kept.
    pub fn apply_level_down(self, new_level: u32) -> Self {
        Self {
            current_level: new_level.max(MIN_LEVEL),
            ..self
        }
    }
}

/// A progress write requested by the trial engine at the end of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProgressUpdate {
    /// Merge an observed `(level, score)` into the stored record.
    Commit { level: u32, score: u32 },
    /// Lower the stored level after a failed session; the score is discarded.
    LevelDown { level: u32 },
}

/// A user authenticated against the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub display_name: String,
}

/// One row of the remote progress table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub identity_id: String,
    pub display_name: String,
    pub highest_level: u32,
    pub best_score: u32,
    pub updated_at: DateTime<Utc>,
}

impl LeaderboardEntry {
    /// Build the remote row for an identity's progress.
    pub fn from_progress(identity: &Identity, progress: &PersistedProgress) -> Self {
        Self {
            identity_id: identity.id.clone(),
            display_name: identity.display_name.clone(),
            highest_level: progress.highest_level_reached,
            best_score: progress.best_score,
            updated_at: Utc::now(),
        }
    }

    /// The remote row has no separate current level; its highest level
    /// fills that field. [`PersistedProgress::merge_remote_row`] decides
    /// whether it counts.
    pub fn to_progress(&self) -> PersistedProgress {
        PersistedProgress::new(self.highest_level, self.highest_level, self.best_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_takes_per_field_max() {
        let local = PersistedProgress::new(3, 3, 20);
        let remote = PersistedProgress::new(5, 5, 10);
        let merged = PersistedProgress::merge(local, Some(remote));
        assert_eq!(merged.current_level, 5);
        assert_eq!(merged.best_score, 20);
        assert_eq!(merged.highest_level_reached, 5);
    }

    #[test]
    fn test_merge_is_symmetric() {
        let a = PersistedProgress::new(7, 9, 12);
        let b = PersistedProgress::new(8, 8, 30);
        assert_eq!(
            PersistedProgress::merge(a, Some(b)),
            PersistedProgress::merge(b, Some(a))
        );
    }

    #[test]
    fn test_merge_without_remote_keeps_local() {
        let local = PersistedProgress::new(4, 6, 22);
        assert_eq!(PersistedProgress::merge(local, None), local);
    }

    #[test]
    fn test_remote_row_does_not_raise_saved_level() {
        let local = PersistedProgress::new(4, 5, 28);
        let row = PersistedProgress::new(5, 5, 28);
        assert_eq!(PersistedProgress::merge_remote_row(local, Some(row), true), local);

        let fresh = PersistedProgress::default();
        assert_eq!(
            PersistedProgress::merge_remote_row(fresh, Some(row), false),
            PersistedProgress::new(5, 5, 28)
        );
    }

    #[test]
    fn test_commit_equal_level_never_lowers_best() {
        let persisted = PersistedProgress::new(4, 4, 25);
        let next = persisted.apply_commit(4, 10);
        assert_eq!(next.best_score, 25);
        assert_eq!(next.current_level, 4);

        let raised = persisted.apply_commit(4, 28);
        assert_eq!(raised.best_score, 28);
    }

    #[test]
    fn test_commit_higher_level_adopts_score() {
        let persisted = PersistedProgress::new(4, 4, 25);
        let next = persisted.apply_commit(5, 27);
        assert_eq!(next, PersistedProgress::new(5, 5, 27));
    }

    #[test]
    fn test_commit_lower_level_is_noop() {
        let persisted = PersistedProgress::new(6, 8, 18);
        let next = persisted.apply_commit(3, 29);
        assert_eq!(next, persisted);
    }

    #[test]
    fn test_level_down_keeps_best_and_highest() {
        let persisted = PersistedProgress::new(6, 8, 18);
        let next = persisted.apply_level_down(5);
        assert_eq!(next.current_level, 5);
        assert_eq!(next.best_score, 18);
        assert_eq!(next.highest_level_reached, 8);

        assert_eq!(PersistedProgress::default().apply_level_down(0).current_level, 1);
    }
}
