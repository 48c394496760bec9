//! Main profile service implementation

use std::sync::Arc;

use crate::domain::entities::account::Account;
use crate::domain::entities::profile::{Profile, ProfileUpdate, MAX_PHONE_NUMBER_LENGTH};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::{AccountRepository, ProfileRepository};
use crate::services::avatar::{AvatarImage, AvatarService, AvatarStore, StoredAvatar};

/// Profile reads, updates and avatar uploads
pub struct ProfileService<A, P, S>
where
    A: AccountRepository,
    P: ProfileRepository,
    S: AvatarStore,
{
    account_repository: Arc<A>,
    profile_repository: Arc<P>,
    avatar_service: Arc<AvatarService<S>>,
}

impl<A, P, S> ProfileService<A, P, S>
where
    A: AccountRepository,
    P: ProfileRepository,
    S: AvatarStore,
{
    pub fn new(
        account_repository: Arc<A>,
        profile_repository: Arc<P>,
        avatar_service: Arc<AvatarService<S>>,
    ) -> Self {
        Self {
            account_repository,
            profile_repository,
            avatar_service,
        }
    }

    /// Profile of the account registered under `email`
    pub async fn profile(&self, email: &str) -> DomainResult<Profile> {
        let account = self.account(email).await?;
        self.profile_of(&account).await
    }

    /// Apply a partial update to the profile of `email`
    ///
    /// # Returns
    ///
    /// * `Ok(Profile)` - The updated profile
    /// * `Err(DomainError::Validation)` - Phone number too long or a name is blank
    pub async fn update_profile(&self, email: &str, update: ProfileUpdate) -> DomainResult<Profile> {
        validate_update(&update)?;

        let account = self.account(email).await?;
        let mut profile = self.profile_of(&account).await?;
        profile.apply(update);

        let profile = self.profile_repository.update(profile).await?;
        tracing::info!(account_id = %account.id, event = "profile_updated", "Profile updated");
        Ok(profile)
    }

    /// Normalize and store an uploaded avatar, recording its path on the profile
    ///
    /// A previous upload stored under a different path (another format) is
    /// deleted once the profile points at the new one. Failing to delete it
    /// is logged, not returned.
    pub async fn upload_avatar(&self, email: &str, raw: Vec<u8>) -> DomainResult<(Profile, StoredAvatar)> {
        let account = self.account(email).await?;
        let mut profile = self.profile_of(&account).await?;
        let previous_path = profile.avatar_path.clone();

        let stored = self.avatar_service.on_save(account.id, raw).await?;
        profile.set_avatar_path(stored.path.clone());
        let profile = self.profile_repository.update(profile).await?;

        if previous_path != stored.path {
            if let Err(e) = self.avatar_service.remove_previous(account.id, &previous_path).await {
                tracing::warn!(
                    account_id = %account.id,
                    path = %previous_path,
                    error = %e,
                    "Failed to remove superseded avatar"
                );
            }
        }

        Ok((profile, stored))
    }

    /// Stored avatar of `email`
    ///
    /// # Returns
    ///
    /// * `Ok(AvatarImage)` - Bytes and content type of the current avatar
    /// * `Err(DomainError::NotFound)` - No uploaded avatar is stored
    pub async fn avatar(&self, email: &str) -> DomainResult<AvatarImage> {
        let account = self.account(email).await?;
        let profile = self.profile_of(&account).await?;

        self.avatar_service
            .load(&profile.avatar_path)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: "avatar".to_string(),
            })
    }

    async fn account(&self, email: &str) -> DomainResult<Account> {
        self.account_repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: "account".to_string(),
            })
    }

    async fn profile_of(&self, account: &Account) -> DomainResult<Profile> {
        self.profile_repository
            .find_by_account(account.id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: "profile".to_string(),
            })
    }
}

fn validate_update(update: &ProfileUpdate) -> DomainResult<()> {
    if let Some(phone) = &update.phone_number {
        if phone.chars().count() > MAX_PHONE_NUMBER_LENGTH {
            return Err(DomainError::validation(format!(
                "Phone number must be at most {} characters",
                MAX_PHONE_NUMBER_LENGTH
            )));
        }
    }

    for (field, value) in [("first_name", &update.first_name), ("last_name", &update.last_name)] {
        if matches!(value, Some(v) if v.trim().is_empty()) {
            return Err(DomainError::validation(format!("{} must not be blank", field)));
        }
    }

    Ok(())
}
