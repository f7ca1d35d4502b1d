//! Domain layer for the Cognate trainer
//!
//! This module contains core domain models, errors, and the port traits
//! that adapters implement.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::{DomainError, DomainResult};
