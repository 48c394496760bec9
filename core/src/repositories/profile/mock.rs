//! Mock implementation of ProfileRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::profile::Profile;
use crate::errors::DomainError;

use super::trait_::ProfileRepository;

#[derive(Default)]
pub struct MockProfileRepository {
    profiles: Arc<RwLock<HashMap<Uuid, Profile>>>,
}

impl MockProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProfileRepository for MockProfileRepository {
    async fn create(&self, profile: Profile) -> Result<Profile, DomainError> {
        let mut profiles = self.profiles.write().await;
        if profiles.contains_key(&profile.account_id) {
            return Err(DomainError::Conflict {
                message: "Profile already exists".to_string(),
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
        match profiles.get_mut(&profile.account_id) {
            Some(existing) => {
                *existing = profile.clone();
                Ok(profile)
            }
            None => Err(DomainError::NotFound {
                resource: "profile".to_string(),
            }),
        }
    }
}
