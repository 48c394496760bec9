//! In-memory AccountRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use cm_core::domain::entities::account::Account;
use cm_core::errors::DomainError;
use cm_core::repositories::AccountRepository;
use cm_shared::utils::validation::normalize_email;

/// Account repository backed by a map keyed by id
#[derive(Clone, Default)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored account
    pub async fn all(&self) -> Vec<Account> {
        self.accounts.read().await.values().cloned().collect()
    }

    fn not_found() -> DomainError {
        DomainError::NotFound {
            resource: "account".to_string(),
        }
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let email = normalize_email(email);
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        Ok(self.accounts.read().await.get(&id).cloned())
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;
        if accounts.values().any(|a| a.email == account.email) {
            return Err(DomainError::Conflict {
                message: "create account: already exists".to_string(),
            });
        }
        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update_refresh_token(&self, id: Uuid, token: Option<String>) -> Result<(), DomainError> {
        let mut accounts = self.accounts.write().await;
        let account = accounts.get_mut(&id).ok_or_else(Self::not_found)?;
        account.set_refresh_token(token);
        Ok(())
    }

    async fn mark_verified(&self, email: &str) -> Result<Account, DomainError> {
        let email = normalize_email(email);
        let mut accounts = self.accounts.write().await;
        let account = accounts
            .values_mut()
            .find(|a| a.email == email)
            .ok_or_else(Self::not_found)?;
        account.verify();
        Ok(account.clone())
    }

    async fn update_avatar(&self, id: Uuid, avatar: Option<String>) -> Result<(), DomainError> {
        let mut accounts = self.accounts.write().await;
        let account = accounts.get_mut(&id).ok_or_else(Self::not_found)?;
        account.set_avatar(avatar);
        Ok(())
    }
}
