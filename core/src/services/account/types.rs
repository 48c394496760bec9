//! Input types for the account service

use serde::{Deserialize, Serialize};

use cm_shared::utils::validation::validators;

use crate::errors::DomainError;

/// Allowed username length in characters, inclusive
pub const USERNAME_LENGTH: (usize, usize) = (5, 100);
/// Allowed password length in characters, inclusive
pub const PASSWORD_LENGTH: (usize, usize) = (6, 25);

/// Registration request
#[derive(Debug, Clone, Deserialize)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl NewAccount {
    /// Checks field syntax and lengths
    pub fn validate(&self) -> Result<(), DomainError> {
        if !validators::is_valid_email(&self.email) {
            return Err(DomainError::validation(format!("Invalid email address: {}", self.email)));
        }

        let (min, max) = USERNAME_LENGTH;
        if !validators::not_empty(&self.username) || !validators::length_between(&self.username, min, max) {
            return Err(DomainError::validation(format!(
                "Username must be between {} and {} characters",
                min, max
            )));
        }

        let (min, max) = PASSWORD_LENGTH;
        if !validators::length_between(&self.password, min, max) {
            return Err(DomainError::validation(format!(
                "Password must be between {} and {} characters",
                min, max
            )));
        }

        Ok(())
    }
}

/// Result of asking for another confirmation email
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResendOutcome {
    /// A fresh confirmation email was handed to the transport
    Sent,
    /// The account is verified; nothing was sent
    AlreadyConfirmed,
    /// No account uses this address; nothing was sent
    UnknownEmail,
}
