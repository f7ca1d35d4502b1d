pub mod config;
pub mod progress;
pub mod relationship;
pub mod session;
pub mod settings;

pub use config::{Config, DatabaseConfig, LoggingConfig, RemoteConfig, SessionTimingConfig};
pub use progress::{Identity, LeaderboardEntry, PersistedProgress, ProgressUpdate};
pub use relationship::{RelationshipType, StimulusPair};
pub use session::{
    EngineState, FeedbackKind, GameMode, SessionConfig, SessionOutcome, SessionState, TrialRecord,
};
pub use settings::{AutoContinueSettings, Settings};
