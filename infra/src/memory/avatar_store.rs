//! In-memory AvatarStore

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use cm_core::errors::AvatarError;
use cm_core::services::avatar::AvatarStore;

use crate::storage::PROFILE_IMAGES_DIR;

#[derive(Clone, Default)]
pub struct InMemoryAvatarStore {
    files: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryAvatarStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored keys, sorted
    pub async fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.files.read().await.keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl AvatarStore for InMemoryAvatarStore {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<String, AvatarError> {
        self.files.write().await.insert(key.to_string(), bytes);
        Ok(format!("{}/{}", PROFILE_IMAGES_DIR, key))
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, AvatarError> {
        Ok(self.files.read().await.get(key).cloned())
    }

    async fn delete(&self, key: &str) -> Result<(), AvatarError> {
        self.files.write().await.remove(key);
        Ok(())
    }
}
