//! Core trainer services.

pub mod catalog;
pub mod difficulty;
pub mod pair_sampler;
pub mod progress_service;
pub mod session_runner;
pub mod settings_service;
pub mod trial_engine;

pub use catalog::StimulusCatalog;
pub use difficulty::{deadline, deadline_ms, evaluate, SessionTally};
pub use pair_sampler::PairSampler;
pub use progress_service::{CommitReport, ProgressService, RemoteSync};
pub use session_runner::{RunnerHandle, SessionReport, SessionRunner};
pub use settings_service::SettingsService;
pub use trial_engine::{Effect, EngineInput, EngineTiming, TimerKind, TimerToken, TrialEngine};
