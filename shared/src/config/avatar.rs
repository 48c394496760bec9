//! Avatar storage configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// Avatar normalisation and storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AvatarConfig {
    /// Maximum width and height of a stored avatar, in pixels
    pub bound: u32,

    /// Directory uploaded media is written under
    pub media_root: String,

    /// Path recorded on new profiles before any upload
    pub default_avatar: String,
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            bound: 250,
            media_root: String::from("media"),
            default_avatar: String::from("default_avatar.png"),
        }
    }
}

impl AvatarConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bound: env_or("AVATAR_MAX_DIMENSION", defaults.bound),
            media_root: std::env::var("MEDIA_ROOT").unwrap_or(defaults.media_root),
            default_avatar: std::env::var("DEFAULT_AVATAR").unwrap_or(defaults.default_avatar),
        }
    }
}
