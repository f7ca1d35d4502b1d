//! Infrastructure adapters for external systems.

pub mod memory;
pub mod remote;
pub mod sqlite;

pub use memory::InMemoryLocalStore;
pub use remote::HttpRemoteStore;
pub use sqlite::SqliteLocalStore;
