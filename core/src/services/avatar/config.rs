//! Configuration for the avatar service

use cm_shared::config::AvatarConfig;

/// Configuration for the avatar service
#[derive(Debug, Clone)]
pub struct AvatarServiceConfig {
    /// Maximum stored width and height in pixels
    pub bound: u32,
}

impl Default for AvatarServiceConfig {
    fn default() -> Self {
        Self { bound: 250 }
    }
}

impl From<&AvatarConfig> for AvatarServiceConfig {
    fn from(config: &AvatarConfig) -> Self {
        Self { bound: config.bound }
    }
}
