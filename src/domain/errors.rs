//! Domain errors for the Cognate trainer.

use thiserror::Error;

/// Domain-level errors that can occur in the Cognate system.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Local store error: {0}")]
    LocalStore(String),

    #[error("Remote store unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("Remote store request failed: {0}")]
    RemoteFailure(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Session runner stopped: {0}")]
    RunnerStopped(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Whether the error came from the remote store. Remote errors are
    /// reported to the player but never affect local state.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::RemoteUnavailable(_) | Self::RemoteFailure(_))
    }
}

impl From<sqlx::Error> for DomainError {
    fn from(err: sqlx::Error) -> Self {
        DomainError::LocalStore(err.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}
