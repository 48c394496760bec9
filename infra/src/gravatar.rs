//! Gravatar implementation of the AvatarLocator trait.
//!
//! The URL is derived from a SHA-256 digest of the normalized email, so no
//! request is made at registration time.

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use cm_core::services::account::AvatarLocator;
use cm_shared::utils::validation::{normalize_email, validators};

const GRAVATAR_BASE_URL: &str = "https://www.gravatar.com/avatar";

/// Builds Gravatar URLs for registered emails
#[derive(Debug, Clone)]
pub struct GravatarLocator {
    /// Image served when the address has no Gravatar (`d` parameter)
    default_image: String,
}

impl GravatarLocator {
    pub fn new(default_image: impl Into<String>) -> Self {
        Self {
            default_image: default_image.into(),
        }
    }

    pub fn url_for(&self, email: &str) -> String {
        let digest = Sha256::digest(normalize_email(email).as_bytes());
        format!("{}/{}?d={}", GRAVATAR_BASE_URL, hex::encode(digest), self.default_image)
    }
}

impl Default for GravatarLocator {
    fn default() -> Self {
        Self::new("identicon")
    }
}

#[async_trait]
impl AvatarLocator for GravatarLocator {
    async fn locate(&self, email: &str) -> Result<String, String> {
        if !validators::is_valid_email(email) {
            return Err(format!("Cannot derive avatar for invalid email: {}", email));
        }
        Ok(self.url_for(email))
    }
}
