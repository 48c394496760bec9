//! Error types for authentication, tokens, mail dispatch and avatar handling.

use thiserror::Error;

use crate::domain::entities::token::TokenKind;

/// Authentication failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email or wrong password. The two are not distinguished.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email not confirmed")]
    EmailNotConfirmed,
}

/// Token issuance and validation failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Malformed token")]
    TokenMalformed,

    #[error("Wrong token kind: expected {expected}, got {actual}")]
    WrongKind { expected: TokenKind, actual: TokenKind },

    #[error("Token revoked")]
    TokenRevoked,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

/// Outbound mail failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("Mail transport connection failed: {0}")]
    Connection(String),

    #[error("Invalid mail address: {0}")]
    InvalidAddress(String),

    #[error("Failed to build mail message: {0}")]
    Build(String),
}

/// Avatar decode, encode and storage failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AvatarError {
    #[error("Unsupported or corrupt image: {0}")]
    Decode(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),

    #[error("Avatar storage failed: {0}")]
    Storage(String),
}
