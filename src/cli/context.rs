//! Wiring of stores and services shared by the commands.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::adapters::remote::{build_remote_store, configured_identity};
use crate::adapters::sqlite::initialize_database;
use crate::adapters::{InMemoryLocalStore, SqliteLocalStore};
use crate::domain::models::Config;
use crate::domain::ports::LocalStore;
use crate::services::{ProgressService, SettingsService};

pub struct AppContext {
    pub config: Config,
    pub progress: Arc<ProgressService>,
    pub settings: SettingsService,
}

impl AppContext {
    /// Open the on-disk local store and the configured remote store.
    pub async fn open(config: Config) -> Result<Self> {
        let pool = initialize_database(&config.database)
            .await
            .with_context(|| format!("Failed to open database at {}", config.database.path))?;
        Self::with_local_store(config, Arc::new(SqliteLocalStore::new(pool)))
    }

    /// Context whose progress and settings live only in memory.
    pub fn ephemeral(config: Config) -> Result<Self> {
        Self::with_local_store(config, Arc::new(InMemoryLocalStore::new()))
    }

    fn with_local_store(config: Config, local: Arc<dyn LocalStore>) -> Result<Self> {
        let remote = build_remote_store(&config.remote).context("Failed to configure remote store")?;
        let identity = Arc::new(configured_identity(&config.remote));
        let progress = Arc::new(ProgressService::new(local.clone(), remote, identity));
        Ok(Self {
            config,
            progress,
            settings: SettingsService::new(local),
        })
    }
}
