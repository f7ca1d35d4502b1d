//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the interfaces that adapters must implement:
//! - LocalStore: string key/value storage for settings and progress
//! - RemoteStore: per-identity progress rows and the leaderboard
//! - IdentityProvider: the authenticated remote identity, if any
//! - Presenter: rendering of engine frames and recoverable errors
//!
//! These traits keep the trial engine and the progress rules independent
//! of specific storage and display implementations.

pub mod identity;
pub mod local_store;
pub mod null_remote;
pub mod presenter;
pub mod remote_store;

pub use identity::{IdentityProvider, StaticIdentity};
pub use local_store::{LocalStore, StoreKey};
pub use null_remote::NullRemoteStore;
pub use presenter::{Frame, Presenter};
pub use remote_store::RemoteStore;
