//! Profile repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::profile::Profile;
use crate::errors::DomainError;

/// Persistence for the one-per-account profile
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Persist a new profile. `Conflict` if the account already has one.
    async fn create(&self, profile: Profile) -> Result<Profile, DomainError>;

    async fn find_by_account(&self, account_id: Uuid) -> Result<Option<Profile>, DomainError>;

    /// Overwrite an existing profile. `NotFound` if the account has none.
    async fn update(&self, profile: Profile) -> Result<Profile, DomainError>;
}
