//! Account repository trait defining the interface for account persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::DomainError;

/// Repository trait for Account entity persistence operations
///
/// Every mutation is a single statement; implementations do not need
/// multi-step transactions.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by email address
    ///
    /// # Arguments
    /// * `email` - Email address, matched case-insensitively
    ///
    /// # Returns
    /// * `Ok(Some(Account))` - Account found
    /// * `Ok(None)` - No account registered under that email
    /// * `Err(DomainError)` - Storage error
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// Find an account by its unique identifier
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;

    /// Persist a new account
    ///
    /// # Returns
    /// * `Ok(Account)` - The stored account
    /// * `Err(DomainError::Conflict)` - An account with the same email exists
    async fn create(&self, account: Account) -> Result<Account, DomainError>;

    /// Replace the persisted refresh token. `None` clears it.
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - No account with that id
    async fn update_refresh_token(&self, id: Uuid, token: Option<String>) -> Result<(), DomainError>;

    /// Set the verified flag on the account registered under `email`
    ///
    /// # Returns
    /// * `Ok(Account)` - The account after the update
    /// * `Err(DomainError::NotFound)` - No account registered under that email
    async fn mark_verified(&self, email: &str) -> Result<Account, DomainError>;

    /// Replace the remote avatar URL
    async fn update_avatar(&self, id: Uuid, avatar: Option<String>) -> Result<(), DomainError>;
}
