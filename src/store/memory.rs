// src/store/memory.rs

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::DraftStore;
use crate::error::EditorError;

/// Process-local draft store. Contents vanish on restart.
#[derive(Debug, Default)]
pub struct MemoryDraftStore {
    slots: RwLock<HashMap<String, String>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DraftStore for MemoryDraftStore {
    async fn get(&self, key: &str) -> Result<Option<String>, EditorError> {
        Ok(self.slots.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), EditorError> {
        self.slots
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
