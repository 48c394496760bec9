//! Avatar service module
//!
//! Normalizes uploaded avatars so the stored image never exceeds the
//! configured bounding box. Images are downscaled preserving aspect ratio
//! and never upscaled. Each account keeps at most one stored avatar.

mod config;
mod resize;
mod service;
mod traits;
mod types;

#[cfg(test)]
pub(crate) mod tests;

pub use config::AvatarServiceConfig;
pub use resize::fit_within;
pub use service::AvatarService;
pub use traits::AvatarStore;
pub use types::{AvatarImage, StoredAvatar};
