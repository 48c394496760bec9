use cm_core::domain::TokenPair;
use cm_core::services::NewAccount;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::user::AccountView;

/// Body of `POST /api/auth/signup`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 5, max = 100))]
    pub username: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 6, max = 25))]
    pub password: String,
}

impl From<SignupRequest> for NewAccount {
    fn from(request: SignupRequest) -> Self {
        NewAccount {
            username: request.username,
            email: request.email,
            password: request.password,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupResponse {
    pub user: AccountView,
    pub detail: String,
}

impl SignupResponse {
    pub const DETAIL: &'static str =
        "User successfully created. Check your email for confirmation.";

    pub fn new(user: AccountView) -> Self {
        Self {
            user,
            detail: Self::DETAIL.to_string(),
        }
    }
}

/// Body of `POST /api/auth/request_email`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmailRequest {
    #[validate(email)]
    pub email: String,
}

/// Form body of `POST /api/auth/login`; `username` carries the email address
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPairResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

impl From<TokenPair> for TokenPairResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: pair.token_type,
            expires_in: pair.expires_in,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_request_validation() {
        let valid = SignupRequest {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "secret1".to_string(),
        };
        assert!(valid.validate().is_ok());

        let invalid = SignupRequest {
            username: "al".to_string(),
            email: "not-an-email".to_string(),
            password: "123".to_string(),
        };
        let errors = invalid.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
    }

    #[test]
    fn test_email_request_validation() {
        let valid = EmailRequest {
            email: "alice@example.com".to_string(),
        };
        let invalid = EmailRequest {
            email: "alice".to_string(),
        };

        assert!(valid.validate().is_ok());
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_token_pair_response_keeps_bearer_type() {
        let pair = TokenPair::new("a".to_string(), "r".to_string(), 900);
        let response = TokenPairResponse::from(pair);

        assert_eq!(response.token_type, "bearer");
        assert_eq!(response.expires_in, 900);
    }
}
