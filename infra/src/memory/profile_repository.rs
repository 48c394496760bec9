//! In-memory ProfileRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use cm_core::domain::entities::profile::Profile;
use cm_core::errors::DomainError;
use cm_core::repositories::ProfileRepository;

#[derive(Clone, Default)]
pub struct InMemoryProfileRepository {
    profiles: Arc<RwLock<HashMap<Uuid, Profile>>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn create(&self, profile: Profile) -> Result<Profile, DomainError> {
        let mut profiles = self.profiles.write().await;
        if profiles.contains_key(&profile.account_id) {
            return Err(DomainError::Conflict {
                message: "create profile: already exists".to_string(),
            });
        }
        profiles.insert(profile.account_id, profile.clone());
        Ok(profile)
    }

    async fn find_by_account(&self, account_id: Uuid) -> Result<Option<Profile>, DomainError> {
        Ok(self.profiles.read().await.get(&account_id).cloned())
    }

    async fn update(&self, profile: Profile) -> Result<Profile, DomainError> {
        let mut profiles = self.profiles.write().await;
        let existing = profiles
            .get_mut(&profile.account_id)
            .ok_or_else(|| DomainError::NotFound {
                resource: "profile".to_string(),
            })?;
        *existing = profile.clone();
        Ok(profile)
    }
}
