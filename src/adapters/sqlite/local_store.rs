//! SQLite implementation of the LocalStore.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::domain::errors::DomainResult;
use crate::domain::ports::{LocalStore, StoreKey};

#[derive(Clone)]
pub struct SqliteLocalStore {
    pool: SqlitePool,
}

impl SqliteLocalStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LocalStore for SqliteLocalStore {
    async fn get(&self, key: StoreKey) -> DomainResult<Option<String>> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM settings_kv WHERE key = ?")
            .bind(key.as_str())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|(value,)| value))
    }

    async fn set(&self, key: StoreKey, value: &str) -> DomainResult<()> {
        sqlx::query(
            r#"INSERT INTO settings_kv (key, value, updated_at) VALUES (?, ?, ?)
               ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at"#
        )
        .bind(key.as_str())
        .bind(value)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn remove(&self, key: StoreKey) -> DomainResult<()> {
        sqlx::query("DELETE FROM settings_kv WHERE key = ?")
            .bind(key.as_str())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::create_migrated_test_pool;

    async fn setup_store() -> SqliteLocalStore {
        let pool = create_migrated_test_pool().await.unwrap();
        SqliteLocalStore::new(pool)
    }

    #[tokio::test]
    async fn test_missing_key_is_none() {
        let store = setup_store().await;
        assert_eq!(store.get(StoreKey::SavedLevel).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_overwrites() {
        let store = setup_store().await;
        store.set(StoreKey::SavedLevel, "3").await.unwrap();
        store.set(StoreKey::SavedLevel, "4").await.unwrap();
        assert_eq!(store.get(StoreKey::SavedLevel).await.unwrap().as_deref(), Some("4"));
    }

    #[tokio::test]
    async fn test_remove_only_touches_one_key() {
        let store = setup_store().await;
        store.set(StoreKey::BestScore, "20").await.unwrap();
        store.set(StoreKey::SoundEnabled, "false").await.unwrap();

        store.remove(StoreKey::BestScore).await.unwrap();
        assert_eq!(store.get(StoreKey::BestScore).await.unwrap(), None);
        assert_eq!(store.get(StoreKey::SoundEnabled).await.unwrap().as_deref(), Some("false"));
    }
}
