//! Trait for avatar storage

use async_trait::async_trait;

use crate::errors::AvatarError;

/// Binary storage for avatar images
#[async_trait]
pub trait AvatarStore: Send + Sync {
    /// Store `bytes` under `key`, replacing any previous content.
    /// Returns the stored path relative to the media root.
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<String, AvatarError>;

    /// Fetch the bytes stored under `key`
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, AvatarError>;

    /// Remove the bytes stored under `key`; a missing key is not an error
    async fn delete(&self, key: &str) -> Result<(), AvatarError>;
}
