//! Account entity representing a registered user of the contacts API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use cm_shared::utils::validation::normalize_email;

/// A registered account.
///
/// The email is stored lowercased so lookups are case-insensitive. The
/// refresh token holds the single active refresh credential and is cleared
/// on logout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier for the account
    pub id: Uuid,

    /// Display name chosen at registration
    pub username: String,

    /// Lowercased, unique email address
    pub email: String,

    /// bcrypt hash of the password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Currently active refresh token, if any
    #[serde(skip_serializing)]
    pub refresh_token: Option<String>,

    /// Whether the email address has been confirmed
    pub is_verified: bool,

    /// Remote avatar URL resolved at registration
    pub avatar: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new, unverified account with no refresh token.
    pub fn new(username: String, email: &str, password_hash: String, avatar: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            email: normalize_email(email),
            password_hash,
            refresh_token: None,
            is_verified: false,
            avatar,
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the account as verified.
    ///
    /// Returns `false` when the account was already verified, in which case
    /// nothing changes.
    pub fn verify(&mut self) -> bool {
        if self.is_verified {
            return false;
        }
        self.is_verified = true;
        self.updated_at = Utc::now();
        true
    }

    /// Replaces the persisted refresh token.
    pub fn set_refresh_token(&mut self, token: Option<String>) {
        self.refresh_token = token;
        self.updated_at = Utc::now();
    }

    pub fn set_avatar(&mut self, avatar: Option<String>) {
        self.avatar = avatar;
        self.updated_at = Utc::now();
    }
}
