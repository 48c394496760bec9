//! Main avatar service implementation

use std::io::Cursor;
use std::sync::Arc;

use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use uuid::Uuid;

use crate::errors::{AvatarError, DomainResult};

use super::config::AvatarServiceConfig;
use super::resize::fit_within;
use super::traits::AvatarStore;
use super::types::{AvatarImage, StoredAvatar};

/// Avatar normalization on profile save
pub struct AvatarService<S: AvatarStore> {
    store: Arc<S>,
    config: AvatarServiceConfig,
}

impl<S: AvatarStore> AvatarService<S> {
    pub fn new(store: Arc<S>, config: AvatarServiceConfig) -> Self {
        Self { store, config }
    }

    /// Store an uploaded avatar for `account_id`
    ///
    /// The raw bytes are persisted first. If either side exceeds the bound
    /// the stored image is rewritten at the scaled size in the same format.
    ///
    /// # Returns
    ///
    /// * `Ok(StoredAvatar)` - Stored path and final dimensions
    /// * `Err(AvatarError::Decode)` - Not a PNG, JPEG or WebP image
    /// * `Err(AvatarError::Storage)` - The store rejected the write
    pub async fn on_save(&self, account_id: Uuid, raw: Vec<u8>) -> DomainResult<StoredAvatar> {
        let format = image::guess_format(&raw).map_err(|e| AvatarError::Decode(e.to_string()))?;
        let extension = extension_for(format)?;
        let decoded = image::load_from_memory_with_format(&raw, format)
            .map_err(|e| AvatarError::Decode(e.to_string()))?;

        let key = format!("{}.{}", account_id, extension);
        let path = self.store.put(&key, raw).await?;
        let (width, height) = (decoded.width(), decoded.height());

        let Some((new_width, new_height)) = fit_within(width, height, self.config.bound) else {
            tracing::debug!(%account_id, width, height, "Avatar within bound, stored as uploaded");
            return Ok(StoredAvatar {
                path,
                width,
                height,
                resized: false,
            });
        };

        let resized = decoded.resize_exact(new_width, new_height, FilterType::Lanczos3);
        let bytes = encode(&resized, format)?;
        let path = self.store.put(&key, bytes).await?;

        tracing::info!(
            %account_id,
            from_width = width,
            from_height = height,
            width = new_width,
            height = new_height,
            event = "avatar_resized",
            "Avatar downscaled"
        );

        Ok(StoredAvatar {
            path,
            width: new_width,
            height: new_height,
            resized: true,
        })
    }

    /// Delete an avatar of `account_id` superseded by a newer upload
    ///
    /// Only files stored under the account's own key are removed; paths such
    /// as the shared default avatar are left alone.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The previous file was removed
    /// * `Ok(false)` - `previous_path` is not one of the account's files
    pub async fn remove_previous(&self, account_id: Uuid, previous_path: &str) -> DomainResult<bool> {
        let Some(key) = owned_key(account_id, previous_path) else {
            return Ok(false);
        };
        self.store.delete(key).await?;
        tracing::debug!(%account_id, key, "Superseded avatar removed");
        Ok(true)
    }

    /// Fetch a stored avatar by the path [`on_save`](Self::on_save) returned
    pub async fn load(&self, path: &str) -> DomainResult<Option<AvatarImage>> {
        let key = path.rsplit('/').next().unwrap_or(path);
        let Some(bytes) = self.store.get(key).await? else {
            return Ok(None);
        };

        let content_type = image::guess_format(&bytes)
            .map(|format| format.to_mime_type())
            .unwrap_or("application/octet-stream");
        Ok(Some(AvatarImage { bytes, content_type }))
    }
}

/// Key of `path` if it names a file written for `account_id`
fn owned_key(account_id: Uuid, path: &str) -> Option<&str> {
    let key = path.rsplit('/').next()?;
    let (stem, _extension) = key.split_once('.')?;
    (stem == account_id.to_string()).then_some(key)
}

fn extension_for(format: ImageFormat) -> Result<&'static str, AvatarError> {
    match format {
        ImageFormat::Png => Ok("png"),
        ImageFormat::Jpeg => Ok("jpg"),
        ImageFormat::WebP => Ok("webp"),
        other => Err(AvatarError::Decode(format!("Unsupported image format: {:?}", other))),
    }
}

fn encode(image: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>, AvatarError> {
    // JPEG has no alpha channel; the WebP encoder only takes 8-bit RGB(A).
    let converted = match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(image.to_rgb8()),
        ImageFormat::WebP => DynamicImage::ImageRgba8(image.to_rgba8()),
        _ => image.clone(),
    };

    let mut buffer = Cursor::new(Vec::new());
    converted
        .write_to(&mut buffer, format)
        .map_err(|e| AvatarError::Encode(e.to_string()))?;
    Ok(buffer.into_inner())
}
