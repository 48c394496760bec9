//! Trait for avatar lookup at registration

use async_trait::async_trait;

/// Resolves a remote avatar URL for an email address.
///
/// Failures are soft: registration continues without an avatar.
#[async_trait]
pub trait AvatarLocator: Send + Sync {
    async fn locate(&self, email: &str) -> Result<String, String>;
}
