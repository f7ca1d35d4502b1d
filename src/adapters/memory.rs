//! In-memory local store, used by tests and by `--ephemeral` play.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::errors::DomainResult;
use crate::domain::ports::{LocalStore, StoreKey};

#[derive(Debug, Clone, Default)]
pub struct InMemoryLocalStore {
    values: Arc<RwLock<HashMap<StoreKey, String>>>,
}

impl InMemoryLocalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with raw values.
    pub fn with_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = (StoreKey, V)>,
        V: Into<String>,
    {
        let values = values.into_iter().map(|(k, v)| (k, v.into())).collect();
        Self {
            values: Arc::new(RwLock::new(values)),
        }
    }

    pub async fn len(&self) -> usize {
        self.values.read().await.len()
    }
}

#[async_trait]
impl LocalStore for InMemoryLocalStore {
    async fn get(&self, key: StoreKey) -> DomainResult<Option<String>> {
        Ok(self.values.read().await.get(&key).cloned())
    }

    async fn set(&self, key: StoreKey, value: &str) -> DomainResult<()> {
        self.values.write().await.insert(key, value.to_string());
        Ok(())
    }

    async fn remove(&self, key: StoreKey) -> DomainResult<()> {
        self.values.write().await.remove(&key);
        Ok(())
    }
}
