//! Filesystem implementation of the AvatarStore trait.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use cm_core::errors::AvatarError;
use cm_core::services::avatar::AvatarStore;

/// Directory under the media root that holds avatars
pub const PROFILE_IMAGES_DIR: &str = "profile_images";

/// Stores avatars as files under `<media_root>/profile_images/`
pub struct FsAvatarStore {
    media_root: PathBuf,
}

impl FsAvatarStore {
    pub fn new(media_root: impl Into<PathBuf>) -> Self {
        Self {
            media_root: media_root.into(),
        }
    }

    pub fn media_root(&self) -> &Path {
        &self.media_root
    }

    fn file_path(&self, key: &str) -> Result<PathBuf, AvatarError> {
        let is_plain_name = !key.is_empty()
            && !key.starts_with('.')
            && !key.contains(['/', '\\']);
        if !is_plain_name {
            return Err(AvatarError::Storage(format!("Invalid avatar key: {}", key)));
        }
        Ok(self.media_root.join(PROFILE_IMAGES_DIR).join(key))
    }
}

#[async_trait]
impl AvatarStore for FsAvatarStore {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<String, AvatarError> {
        let path = self.file_path(key)?;
        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| AvatarError::Storage(e.to_string()))?;
        }

        tokio::fs::write(&path, &bytes).await.map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "Failed to write avatar");
            AvatarError::Storage(e.to_string())
        })?;

        tracing::debug!(path = %path.display(), size = bytes.len(), "Avatar written");
        Ok(format!("{}/{}", PROFILE_IMAGES_DIR, key))
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, AvatarError> {
        let path = self.file_path(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AvatarError::Storage(e.to_string())),
        }
    }

    async fn delete(&self, key: &str) -> Result<(), AvatarError> {
        let path = self.file_path(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "Avatar removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AvatarError::Storage(e.to_string())),
        }
    }
}
