//! Mock avatar store for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::errors::AvatarError;
use crate::services::avatar::AvatarStore;

#[derive(Default)]
pub struct MockAvatarStore {
    pub files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    /// Number of `put` calls, overwrites included
    pub writes: Arc<Mutex<usize>>,
}

impl MockAvatarStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn write_count(&self) -> usize {
        *self.writes.lock().unwrap()
    }

    /// Stored keys, sorted
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.files.lock().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[async_trait]
impl AvatarStore for MockAvatarStore {
    async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<String, AvatarError> {
        self.files.lock().unwrap().insert(key.to_string(), bytes);
        *self.writes.lock().unwrap() += 1;
        Ok(format!("profile_images/{}", key))
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, AvatarError> {
        Ok(self.files.lock().unwrap().get(key).cloned())
    }

    async fn delete(&self, key: &str) -> Result<(), AvatarError> {
        self.files.lock().unwrap().remove(key);
        Ok(())
    }
}

/// Encodes a solid image of the given size
pub fn sample_image(width: u32, height: u32, format: image::ImageFormat) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([200, 40, 90]));
    let mut buffer = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut buffer, format)
        .unwrap();
    buffer.into_inner()
}
