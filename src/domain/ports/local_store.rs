//! Local store port (trait) for dependency injection.
//!
//! A string key/value store. Settings and progress are encoded as strings
//! by the services; adapters never interpret values.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;

/// The keys the trainer keeps in the local store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    SavedLevel,
    HighestLevel,
    BestScore,
    SoundEnabled,
    AutoContinue,
}

impl StoreKey {
    /// Keys holding progress; cleared by a progress reset.
    pub const PROGRESS: [Self; 3] = [Self::SavedLevel, Self::HighestLevel, Self::BestScore];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SavedLevel => "saved_level",
            Self::HighestLevel => "highest_level",
            Self::BestScore => "best_score",
            Self::SoundEnabled => "sound_enabled",
            Self::AutoContinue => "auto_continue",
        }
    }
}

/// Key/value storage on the local machine.
///
/// Writes are durable once the returned future resolves.
#[async_trait]
pub trait LocalStore: Send + Sync {
    /// Returns the stored value, or `None` if the key was never set.
    async fn get(&self, key: StoreKey) -> DomainResult<Option<String>>;

    /// Stores `value`, replacing any previous value.
    async fn set(&self, key: StoreKey, value: &str) -> DomainResult<()>;

    /// Removes the key. Removing a missing key is not an error.
    async fn remove(&self, key: StoreKey) -> DomainResult<()>;
}
