//! Main token service implementation

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::{Claims, TokenKind, TokenPair};
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Service for minting and validating JWTs
///
/// Expiry is checked against the caller-supplied `now` instead of the
/// library clock, so every operation is deterministic under test.
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    ///
    /// # Returns
    ///
    /// A new `TokenService`, or `DomainError::Internal` when the configured
    /// algorithm is not a shared-secret one
    pub fn new(config: TokenServiceConfig) -> Result<Self, DomainError> {
        if !matches!(config.algorithm, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512) {
            return Err(DomainError::Internal {
                message: format!("Unsupported JWT algorithm: {:?}", config.algorithm),
            });
        }

        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        })
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Mints a signed token of `kind` for `subject`
    ///
    /// # Arguments
    ///
    /// * `kind` - Token kind, which also selects the lifetime
    /// * `subject` - Account email carried in `sub`
    /// * `now` - Issue time; `exp` is `now` plus the kind's lifetime
    pub fn issue(&self, kind: TokenKind, subject: &str, now: DateTime<Utc>) -> Result<String, DomainError> {
        let claims = Claims::new(kind, subject, now, self.config.lifetime(kind));
        let header = Header::new(self.config.algorithm);

        encode(&header, &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, kind = %kind, "Failed to encode token");
            DomainError::Token(TokenError::TokenGenerationFailed)
        })
    }

    /// Validates a token and returns its subject
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The subject email
    /// * `Err(TokenError::TokenMalformed)` - Bad signature or structure
    /// * `Err(TokenError::TokenExpired)` - `now` is past `exp`
    /// * `Err(TokenError::WrongKind)` - Token was minted for another purpose
    pub fn verify(&self, token: &str, expected: TokenKind, now: DateTime<Utc>) -> Result<String, DomainError> {
        let claims = self.decode_claims(token, now)?;

        if claims.scope != expected {
            return Err(DomainError::Token(TokenError::WrongKind {
                expected,
                actual: claims.scope,
            }));
        }

        Ok(claims.sub)
    }

    /// Decodes and checks signature and expiry without checking the kind
    pub fn decode_claims(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, DomainError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "Token failed to decode");
            DomainError::Token(TokenError::TokenMalformed)
        })?;

        if data.claims.is_expired_at(now) {
            return Err(DomainError::Token(TokenError::TokenExpired));
        }

        Ok(data.claims)
    }

    /// Mints an access and refresh token for `subject`
    pub fn issue_pair(&self, subject: &str, now: DateTime<Utc>) -> Result<TokenPair, DomainError> {
        let access_token = self.issue(TokenKind::Access, subject, now)?;
        let refresh_token = self.issue(TokenKind::Refresh, subject, now)?;

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.config.access_token_expiry,
        ))
    }
}
