//! Main verification service implementation

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::entities::token::TokenKind;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::AccountRepository;
use crate::services::token::TokenService;

use super::config::VerificationServiceConfig;
use super::template::render_verification_email;
use super::traits::MailTransport;
use super::types::{ConfirmOutcome, OutboundMail};

/// Verification service for email confirmation links
pub struct VerificationService<M: MailTransport, A: AccountRepository> {
    /// Issues the email verification tokens
    token_service: Arc<TokenService>,
    /// Outbound mail transport
    mail_transport: Arc<M>,
    /// Account storage, for flipping the verified flag
    account_repository: Arc<A>,
    config: VerificationServiceConfig,
}

impl<M: MailTransport, A: AccountRepository> VerificationService<M, A> {
    pub fn new(
        token_service: Arc<TokenService>,
        mail_transport: Arc<M>,
        account_repository: Arc<A>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self {
            token_service,
            mail_transport,
            account_repository,
            config,
        }
    }

    /// Send a confirmation email to an unverified address
    ///
    /// Mints an email verification token, renders it into a link under
    /// `origin_host` and hands the message to the mail transport.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The transport accepted the message
    /// * `Err(DomainError::Dispatch)` - The transport failed; logged, not retried
    pub async fn send_verification(
        &self,
        email: &str,
        display_name: &str,
        origin_host: &str,
    ) -> DomainResult<()> {
        let token = self
            .token_service
            .issue(TokenKind::EmailVerification, email, Utc::now())?;

        let mail = OutboundMail {
            recipient: email.to_string(),
            recipient_name: display_name.to_string(),
            subject: self.config.subject.clone(),
            html_body: render_verification_email(origin_host, display_name, &token),
        };

        if let Err(e) = self.mail_transport.send(mail).await {
            tracing::error!(
                email = %email,
                error = %e,
                event = "verification_email_failed",
                "Failed to send verification email"
            );
            return Err(e.into());
        }

        tracing::info!(
            email = %email,
            event = "verification_email_sent",
            "Verification email sent"
        );
        Ok(())
    }

    /// Confirm an email address from a verification token
    ///
    /// Confirming an already verified account is not an error.
    pub async fn confirm(&self, token: &str) -> DomainResult<ConfirmOutcome> {
        self.confirm_at(token, Utc::now()).await
    }

    /// Same as [`confirm`](Self::confirm) with an explicit clock
    pub async fn confirm_at(&self, token: &str, now: DateTime<Utc>) -> DomainResult<ConfirmOutcome> {
        let email = self
            .token_service
            .verify(token, TokenKind::EmailVerification, now)?;

        let account = self
            .account_repository
            .find_by_email(&email)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: "account".to_string(),
            })?;

        if account.is_verified {
            return Ok(ConfirmOutcome::AlreadyConfirmed);
        }

        self.account_repository.mark_verified(&email).await?;

        tracing::info!(email = %email, event = "email_confirmed", "Email confirmed");
        Ok(ConfirmOutcome::Confirmed)
    }
}
