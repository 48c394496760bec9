//! Configuration for the token service

use std::str::FromStr;

use chrono::Duration;
use jsonwebtoken::Algorithm;

use cm_shared::config::JwtConfig;

use crate::domain::entities::token::TokenKind;
use crate::errors::DomainError;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// JWT signing algorithm, HMAC family only
    pub algorithm: Algorithm,
    /// Access token lifetime in seconds
    pub access_token_expiry: i64,
    /// Refresh token lifetime in seconds
    pub refresh_token_expiry: i64,
    /// Email verification token lifetime in seconds
    pub email_token_expiry: i64,
}

impl TokenServiceConfig {
    /// Builds the service configuration from the shared JWT settings.
    pub fn from_jwt_config(config: &JwtConfig) -> Result<Self, DomainError> {
        let algorithm = Algorithm::from_str(&config.algorithm).map_err(|_| DomainError::Internal {
            message: format!("Unknown JWT algorithm: {}", config.algorithm),
        })?;

        Ok(Self {
            jwt_secret: config.secret.clone(),
            algorithm,
            access_token_expiry: config.access_token_expiry,
            refresh_token_expiry: config.refresh_token_expiry,
            email_token_expiry: config.email_token_expiry,
        })
    }

    /// Lifetime of a token of the given kind
    pub fn lifetime(&self, kind: TokenKind) -> Duration {
        let seconds = match kind {
            TokenKind::Access => self.access_token_expiry,
            TokenKind::Refresh => self.refresh_token_expiry,
            TokenKind::EmailVerification => self.email_token_expiry,
        };
        Duration::seconds(seconds)
    }
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "development-secret-please-change-in-production".to_string(),
            algorithm: Algorithm::HS256,
            access_token_expiry: 15 * 60,
            refresh_token_expiry: 7 * 24 * 60 * 60,
            email_token_expiry: 24 * 60 * 60,
        }
    }
}
