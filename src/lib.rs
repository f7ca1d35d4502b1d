//! Cognate - adaptive relationship-judgment reaction trainer
//!
//! Each trial names one of seven relationships (part-whole, antonym, same
//! colour, sequential number, cross-notation number, numeric equivalence,
//! same time), then shows a pair of words, numbers or clock readings that
//! the player must judge against it before a level-dependent deadline.
//! Adaptive sessions move the level up or down from the session's error
//! count and persist progress locally and, when signed in, to a remote
//! leaderboard.
//!
//! # Architecture
//!
//! - **Domain Layer** (`domain`): models, ports and errors
//! - **Service Layer** (`services`): catalog, sampler, difficulty rules,
//!   trial engine, session runner and progress reconciliation
//! - **Adapters** (`adapters`): SQLite, in-memory and HTTP stores
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): command-line interface

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{
    Config, GameMode, PersistedProgress, RelationshipType, SessionConfig, SessionOutcome, Settings,
    StimulusPair,
};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{ProgressService, SessionRunner, StimulusCatalog, TrialEngine};
