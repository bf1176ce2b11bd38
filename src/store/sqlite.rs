// src/store/sqlite.rs

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

use super::DraftStore;
use crate::error::EditorError;

/// Draft store backed by a local SQLite file.
#[derive(Debug, Clone)]
pub struct SqliteDraftStore {
    pool: SqlitePool,
}

impl SqliteDraftStore {
    /// Opens (creating if needed) the database at `url` and applies migrations.
    ///
    /// `sqlite::memory:` databases live per connection, so callers using one
    /// should pass `max_connections = 1`.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        tracing::info!("Running draft store migrations...");
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl DraftStore for SqliteDraftStore {
    async fn get(&self, key: &str) -> Result<Option<String>, EditorError> {
        sqlx::query_scalar::<_, String>("SELECT value FROM drafts WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to read draft {}: {:?}", key, e);
                EditorError::Storage(e.to_string())
            })
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), EditorError> {
        sqlx::query(
            r#"
            INSERT INTO drafts (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(chrono::Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to write draft {}: {:?}", key, e);
            EditorError::Storage(e.to_string())
        })?;

        Ok(())
    }
}
