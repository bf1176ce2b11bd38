// src/store/mod.rs

use async_trait::async_trait;

use crate::error::EditorError;

pub mod memory;
pub mod sqlite;

pub use memory::MemoryDraftStore;
pub use sqlite::SqliteDraftStore;

/// Key/value string store holding draft slots.
///
/// Writes overwrite unconditionally; concurrent writers to one key are
/// last-write-wins.
#[async_trait]
pub trait DraftStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, EditorError>;

    async fn put(&self, key: &str, value: &str) -> Result<(), EditorError>;
}
