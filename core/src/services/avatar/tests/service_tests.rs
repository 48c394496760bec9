//! Unit tests for the avatar service

use image::ImageFormat;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::{AvatarError, DomainError};
use crate::services::avatar::{AvatarService, AvatarServiceConfig, AvatarStore};

use super::mocks::{sample_image, MockAvatarStore};

fn service() -> (AvatarService<MockAvatarStore>, Arc<MockAvatarStore>) {
    let store = Arc::new(MockAvatarStore::new());
    (
        AvatarService::new(store.clone(), AvatarServiceConfig::default()),
        store,
    )
}

fn stored_dimensions(bytes: &[u8]) -> (u32, u32) {
    let img = image::load_from_memory(bytes).unwrap();
    (img.width(), img.height())
}

#[tokio::test]
async fn test_wide_png_downscaled_to_bound() {
    let (service, store) = service();
    let account_id = Uuid::new_v4();

    let stored = service
        .on_save(account_id, sample_image(500, 250, ImageFormat::Png))
        .await
        .unwrap();

    assert!(stored.resized);
    assert_eq!((stored.width, stored.height), (250, 125));
    assert_eq!(stored.path, format!("profile_images/{}.png", account_id));

    let bytes = store.get(&format!("{}.png", account_id)).await.unwrap().unwrap();
    assert_eq!(stored_dimensions(&bytes), (250, 125));
    assert_eq!(store.write_count(), 2);
}

#[tokio::test]
async fn test_small_image_left_untouched() {
    let (service, store) = service();
    let account_id = Uuid::new_v4();
    let raw = sample_image(100, 100, ImageFormat::Png);

    let stored = service.on_save(account_id, raw.clone()).await.unwrap();

    assert!(!stored.resized);
    assert_eq!((stored.width, stored.height), (100, 100));
    let bytes = store.get(&format!("{}.png", account_id)).await.unwrap().unwrap();
    assert_eq!(bytes, raw);
    assert_eq!(store.write_count(), 1);
}

#[tokio::test]
async fn test_tall_jpeg_keeps_format() {
    let (service, store) = service();
    let account_id = Uuid::new_v4();

    let stored = service
        .on_save(account_id, sample_image(300, 600, ImageFormat::Jpeg))
        .await
        .unwrap();

    assert_eq!((stored.width, stored.height), (125, 250));
    let bytes = store.get(&format!("{}.jpg", account_id)).await.unwrap().unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::Jpeg);
    assert_eq!(stored_dimensions(&bytes), (125, 250));
}

#[tokio::test]
async fn test_garbage_rejected_before_storing() {
    let (service, store) = service();

    let result = service
        .on_save(Uuid::new_v4(), b"definitely not an image".to_vec())
        .await;

    assert!(matches!(result, Err(DomainError::Avatar(AvatarError::Decode(_)))));
    assert_eq!(store.write_count(), 0);
}

#[tokio::test]
async fn test_custom_bound() {
    let store = Arc::new(MockAvatarStore::new());
    let service = AvatarService::new(store, AvatarServiceConfig { bound: 64 });

    let stored = service
        .on_save(Uuid::new_v4(), sample_image(128, 32, ImageFormat::Png))
        .await
        .unwrap();

    assert_eq!((stored.width, stored.height), (64, 16));
}

#[tokio::test]
async fn test_remove_previous_only_touches_own_files() {
    let (service, store) = service();
    let account_id = Uuid::new_v4();
    let other_id = Uuid::new_v4();
    let own = service
        .on_save(account_id, sample_image(10, 10, ImageFormat::Png))
        .await
        .unwrap();
    let other = service
        .on_save(other_id, sample_image(10, 10, ImageFormat::Png))
        .await
        .unwrap();

    assert!(!service.remove_previous(account_id, "default_avatar.png").await.unwrap());
    assert!(!service.remove_previous(account_id, &other.path).await.unwrap());
    assert!(service.remove_previous(account_id, &own.path).await.unwrap());

    assert_eq!(store.keys(), vec![format!("{}.png", other_id)]);
}

#[tokio::test]
async fn test_load_by_stored_path() {
    let (service, _store) = service();
    let account_id = Uuid::new_v4();
    let stored = service
        .on_save(account_id, sample_image(20, 10, ImageFormat::Jpeg))
        .await
        .unwrap();

    let image = service.load(&stored.path).await.unwrap().unwrap();

    assert_eq!(image.content_type, "image/jpeg");
    assert_eq!(stored_dimensions(&image.bytes), (20, 10));
    assert!(service.load("profile_images/missing.png").await.unwrap().is_none());
}
