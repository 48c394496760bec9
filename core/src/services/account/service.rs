//! Main account service implementation

use chrono::{DateTime, Utc};
use constant_time_eq::constant_time_eq;
use std::sync::Arc;

use cm_shared::utils::validation::normalize_email;

use crate::domain::entities::account::Account;
use crate::domain::entities::profile::Profile;
use crate::domain::entities::token::{TokenKind, TokenPair};
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::{AccountRepository, ProfileRepository};
use crate::services::token::TokenService;
use crate::services::verification::{MailTransport, VerificationService};

use super::config::AccountServiceConfig;
use super::traits::AvatarLocator;
use super::types::{NewAccount, ResendOutcome};

/// Account service for registration, login and token rotation
pub struct AccountService<A, P, M, L>
where
    A: AccountRepository,
    P: ProfileRepository,
    M: MailTransport,
    L: AvatarLocator,
{
    /// Account storage
    account_repository: Arc<A>,
    /// Profile storage, written by the post-creation hook
    profile_repository: Arc<P>,
    /// JWT issuance and validation
    token_service: Arc<TokenService>,
    /// Confirmation email dispatch
    verification_service: Arc<VerificationService<M, A>>,
    /// Best-effort avatar lookup
    avatar_locator: Arc<L>,
    config: AccountServiceConfig,
}

impl<A, P, M, L> AccountService<A, P, M, L>
where
    A: AccountRepository,
    P: ProfileRepository,
    M: MailTransport,
    L: AvatarLocator,
{
    /// Create a new account service
    ///
    /// # Arguments
    ///
    /// * `account_repository` - Repository for account persistence
    /// * `profile_repository` - Repository for profile persistence
    /// * `token_service` - Service for JWT management
    /// * `verification_service` - Service sending confirmation emails
    /// * `avatar_locator` - Remote avatar lookup
    /// * `config` - Service configuration
    pub fn new(
        account_repository: Arc<A>,
        profile_repository: Arc<P>,
        token_service: Arc<TokenService>,
        verification_service: Arc<VerificationService<M, A>>,
        avatar_locator: Arc<L>,
        config: AccountServiceConfig,
    ) -> Self {
        Self {
            account_repository,
            profile_repository,
            token_service,
            verification_service,
            avatar_locator,
            config,
        }
    }

    /// Register a new account and send the confirmation email
    ///
    /// The account and its profile are persisted before the email is sent,
    /// so a dispatch failure leaves a stored, unverified account behind;
    /// [`request_confirmation`](Self::request_confirmation) sends it again.
    ///
    /// # Returns
    ///
    /// * `Ok(Account)` - The stored, unverified account
    /// * `Err(DomainError::Validation)` - Bad email, username or password
    /// * `Err(DomainError::Conflict)` - The email is already registered
    /// * `Err(DomainError::Dispatch)` - The confirmation email could not be sent
    pub async fn register(&self, new_account: NewAccount, origin_host: &str) -> DomainResult<Account> {
        new_account.validate()?;
        let email = normalize_email(&new_account.email);

        if self.account_repository.find_by_email(&email).await?.is_some() {
            return Err(DomainError::Conflict {
                message: "Account already exists".to_string(),
            });
        }

        let password_hash = bcrypt::hash(&new_account.password, self.config.bcrypt_cost).map_err(|e| {
            DomainError::Internal {
                message: format!("Failed to hash password: {}", e),
            }
        })?;

        let avatar = match self.avatar_locator.locate(&email).await {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::warn!(email = %email, error = %e, "Avatar lookup failed, continuing without avatar");
                None
            }
        };

        let account = Account::new(new_account.username, &email, password_hash, avatar);
        let account = self.account_repository.create(account).await?;
        self.on_account_created(&account).await?;

        tracing::info!(
            account_id = %account.id,
            email = %account.email,
            event = "account_registered",
            "Account registered"
        );

        self.verification_service
            .send_verification(&account.email, &account.username, origin_host)
            .await?;

        Ok(account)
    }

    /// Send a fresh confirmation email to an unverified account
    ///
    /// Verified accounts and unknown addresses are left alone and reported
    /// through the outcome rather than as errors.
    ///
    /// # Returns
    ///
    /// * `Ok(ResendOutcome)` - What happened for this address
    /// * `Err(DomainError::Dispatch)` - The confirmation email could not be sent
    pub async fn request_confirmation(&self, email: &str, origin_host: &str) -> DomainResult<ResendOutcome> {
        let email = normalize_email(email);
        let account = match self.account_repository.find_by_email(&email).await? {
            Some(account) => account,
            None => {
                tracing::info!(email = %email, event = "confirmation_request_unknown", "No account for address");
                return Ok(ResendOutcome::UnknownEmail);
            }
        };

        if account.is_verified {
            return Ok(ResendOutcome::AlreadyConfirmed);
        }

        self.verification_service
            .send_verification(&account.email, &account.username, origin_host)
            .await?;
        Ok(ResendOutcome::Sent)
    }

    /// Post-creation hook: every account owns exactly one profile
    async fn on_account_created(&self, account: &Account) -> DomainResult<()> {
        let profile = Profile::new(account.id, self.config.default_avatar.clone());
        self.profile_repository.create(profile).await?;
        Ok(())
    }

    /// Authenticate with email and password and issue a token pair
    ///
    /// Unknown emails and wrong passwords both fail with
    /// `AuthError::InvalidCredentials`. The refresh token of the new pair
    /// replaces any previously persisted one.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<TokenPair> {
        let account = self
            .account_repository
            .find_by_email(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let password_ok = bcrypt::verify(password, &account.password_hash).map_err(|e| {
            DomainError::Internal {
                message: format!("Failed to verify password: {}", e),
            }
        })?;
        if !password_ok {
            tracing::info!(email = %account.email, event = "login_failed", "Wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        if !account.is_verified {
            return Err(AuthError::EmailNotConfirmed.into());
        }

        let pair = self.issue_and_store(&account, Utc::now()).await?;
        tracing::info!(email = %account.email, event = "login", "Account logged in");
        Ok(pair)
    }

    /// Exchange the persisted refresh token for a new pair
    ///
    /// A token that validates but does not match the persisted value was
    /// either rotated out or logged out; the persisted value is cleared so
    /// the whole chain is revoked.
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<TokenPair> {
        self.refresh_at(refresh_token, Utc::now()).await
    }

    /// Same as [`refresh`](Self::refresh) with an explicit clock
    pub async fn refresh_at(&self, refresh_token: &str, now: DateTime<Utc>) -> DomainResult<TokenPair> {
        let email = self.token_service.verify(refresh_token, TokenKind::Refresh, now)?;
        let account = self.current_account(&email).await?;

        let matches = account
            .refresh_token
            .as_deref()
            .map(|stored| constant_time_eq(stored.as_bytes(), refresh_token.as_bytes()))
            .unwrap_or(false);

        if !matches {
            self.account_repository
                .update_refresh_token(account.id, None)
                .await?;
            tracing::warn!(
                email = %account.email,
                event = "refresh_token_revoked",
                "Stale refresh token presented, revoking"
            );
            return Err(TokenError::TokenRevoked.into());
        }

        self.issue_and_store(&account, now).await
    }

    /// Clear the persisted refresh token for `email`
    pub async fn logout(&self, email: &str) -> DomainResult<()> {
        let account = self.current_account(email).await?;
        self.account_repository
            .update_refresh_token(account.id, None)
            .await?;
        tracing::info!(email = %account.email, event = "logout", "Account logged out");
        Ok(())
    }

    /// Look up the account a validated token subject refers to
    pub async fn current_account(&self, email: &str) -> DomainResult<Account> {
        self.account_repository
            .find_by_email(email)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: "account".to_string(),
            })
    }

    async fn issue_and_store(&self, account: &Account, now: DateTime<Utc>) -> DomainResult<TokenPair> {
        let pair = self.token_service.issue_pair(&account.email, now)?;
        self.account_repository
            .update_refresh_token(account.id, Some(pair.refresh_token.clone()))
            .await?;
        Ok(pair)
    }
}
