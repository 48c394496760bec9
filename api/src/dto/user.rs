use chrono::{DateTime, NaiveDate, Utc};
use cm_core::domain::{Account, Profile, ProfileUpdate};
use cm_core::services::StoredAvatar;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Public view of an account; never carries the password hash or refresh token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountView {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub is_verified: bool,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Account> for AccountView {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            email: account.email,
            is_verified: account.is_verified,
            avatar: account.avatar,
            created_at: account.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileView {
    pub avatar_path: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub updated_at: DateTime<Utc>,
}

impl From<Profile> for ProfileView {
    fn from(profile: Profile) -> Self {
        Self {
            avatar_path: profile.avatar_path,
            first_name: profile.first_name,
            last_name: profile.last_name,
            phone_number: profile.phone_number,
            birth_date: profile.birth_date,
            updated_at: profile.updated_at,
        }
    }
}

/// Body of `PUT /api/users/profile`; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProfileUpdateRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,

    #[validate(length(max = 15))]
    pub phone_number: Option<String>,

    pub birth_date: Option<NaiveDate>,
}

impl From<ProfileUpdateRequest> for ProfileUpdate {
    fn from(request: ProfileUpdateRequest) -> Self {
        ProfileUpdate {
            first_name: request.first_name,
            last_name: request.last_name,
            phone_number: request.phone_number,
            birth_date: request.birth_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvatarUploadResponse {
    pub avatar_path: String,
    pub width: u32,
    pub height: u32,
    pub resized: bool,
}

impl From<StoredAvatar> for AvatarUploadResponse {
    fn from(stored: StoredAvatar) -> Self {
        Self {
            avatar_path: stored.path,
            width: stored.width,
            height: stored.height,
            resized: stored.resized,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_view_hides_secrets() {
        let mut account = Account::new(
            "alice".to_string(),
            "Alice@Example.com",
            "$2b$04$hash".to_string(),
            None,
        );
        account.set_refresh_token(Some("refresh".to_string()));

        let json = serde_json::to_value(AccountView::from(account)).unwrap();
        assert_eq!(json["email"], "alice@example.com");
        assert!(json.get("password_hash").is_none());
        assert!(json.get("refresh_token").is_none());
    }

    #[test]
    fn test_profile_update_rejects_long_phone_number() {
        let request = ProfileUpdateRequest {
            phone_number: Some("1234567890123456".to_string()),
            ..Default::default()
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_profile_update_parses_birth_date() {
        let request: ProfileUpdateRequest =
            serde_json::from_str(r#"{"first_name":"Ada","birth_date":"1990-04-01"}"#).unwrap();

        assert_eq!(request.first_name.as_deref(), Some("Ada"));
        assert_eq!(request.birth_date, NaiveDate::from_ymd_opt(1990, 4, 1));
        assert!(request.last_name.is_none());
    }
}
