//! Layered configuration: defaults, `.cognate/*.yaml`, then `COGNATE_*`
//! environment overrides.

pub mod loader;

pub use loader::{ConfigError, ConfigLoader};
