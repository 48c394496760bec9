//! Types returned by the avatar service

use serde::{Deserialize, Serialize};

/// Where an avatar was stored and at what size
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAvatar {
    /// Stored path relative to the media root
    pub path: String,
    pub width: u32,
    pub height: u32,
    /// Whether the stored image was downscaled
    pub resized: bool,
}

/// Avatar bytes ready to be served
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarImage {
    pub bytes: Vec<u8>,
    /// MIME type sniffed from the bytes
    pub content_type: &'static str,
}
