//! Profile entity owned by exactly one account.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Longest phone number a profile may store
pub const MAX_PHONE_NUMBER_LENGTH: usize = 15;

/// Personal details attached to an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub account_id: Uuid,
    /// Path of the stored avatar, relative to the media root
    pub avatar_path: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update applied to a profile. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

impl Profile {
    /// Creates an empty profile pointing at the default avatar.
    pub fn new(account_id: Uuid, default_avatar: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            account_id,
            avatar_path: default_avatar.into(),
            first_name: None,
            last_name: None,
            phone_number: None,
            birth_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(first_name) = update.first_name {
            self.first_name = Some(first_name);
        }
        if let Some(last_name) = update.last_name {
            self.last_name = Some(last_name);
        }
        if let Some(phone_number) = update.phone_number {
            self.phone_number = Some(phone_number);
        }
        if let Some(birth_date) = update.birth_date {
            self.birth_date = Some(birth_date);
        }
        self.updated_at = Utc::now();
    }

    pub fn set_avatar_path(&mut self, path: impl Into<String>) {
        self.avatar_path = path.into();
        self.updated_at = Utc::now();
    }
}
