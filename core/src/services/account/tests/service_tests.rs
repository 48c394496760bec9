//! Unit tests for the account service

use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::domain::entities::token::TokenKind;
use crate::errors::{AuthError, DispatchError, DomainError, TokenError};
use crate::repositories::{
    AccountRepository, MockAccountRepository, MockProfileRepository, ProfileRepository,
};
use crate::services::account::{AccountService, AccountServiceConfig, NewAccount, ResendOutcome};
use crate::services::token::{TokenService, TokenServiceConfig};
use crate::services::verification::tests::mocks::{extract_token, MockMailTransport};
use crate::services::verification::{ConfirmOutcome, VerificationService, VerificationServiceConfig};

use super::mocks::MockAvatarLocator;

type TestAccountService =
    AccountService<MockAccountRepository, MockProfileRepository, MockMailTransport, MockAvatarLocator>;

struct Fixture {
    service: TestAccountService,
    verification: Arc<VerificationService<MockMailTransport, MockAccountRepository>>,
    accounts: Arc<MockAccountRepository>,
    profiles: Arc<MockProfileRepository>,
    transport: Arc<MockMailTransport>,
    tokens: Arc<TokenService>,
}

fn fixture_with(mail_fails: bool, locator_fails: bool) -> Fixture {
    let tokens = Arc::new(TokenService::new(TokenServiceConfig::default()).unwrap());
    let accounts = Arc::new(MockAccountRepository::new());
    let profiles = Arc::new(MockProfileRepository::new());
    let transport = Arc::new(MockMailTransport::new(mail_fails));
    let verification = Arc::new(VerificationService::new(
        tokens.clone(),
        transport.clone(),
        accounts.clone(),
        VerificationServiceConfig::default(),
    ));
    let service = AccountService::new(
        accounts.clone(),
        profiles.clone(),
        tokens.clone(),
        verification.clone(),
        Arc::new(MockAvatarLocator::new(locator_fails)),
        AccountServiceConfig {
            bcrypt_cost: 4,
            ..Default::default()
        },
    );
    Fixture {
        service,
        verification,
        accounts,
        profiles,
        transport,
        tokens,
    }
}

fn fixture() -> Fixture {
    fixture_with(false, false)
}

fn new_account(email: &str) -> NewAccount {
    NewAccount {
        username: "alice".to_string(),
        email: email.to_string(),
        password: "secret123".to_string(),
    }
}

/// Registers and confirms an account
async fn registered(f: &Fixture, email: &str) {
    f.service
        .register(new_account(email), "http://localhost:8000/")
        .await
        .unwrap();
    f.accounts.mark_verified(email).await.unwrap();
}

#[tokio::test]
async fn test_register_confirm_scenario() {
    let f = fixture();

    let account = f
        .service
        .register(new_account("a@x.com"), "http://localhost:8000/")
        .await
        .unwrap();

    assert_eq!(f.accounts.count().await, 1);
    let stored = f.accounts.find_by_email("a@x.com").await.unwrap().unwrap();
    assert!(!stored.is_verified);
    assert_eq!(stored.id, account.id);
    assert_ne!(stored.password_hash, "secret123");

    let sent = f.transport.sent();
    assert_eq!(sent.len(), 1);
    let token = extract_token(&sent[0].html_body);
    assert_eq!(
        f.tokens.verify(&token, TokenKind::EmailVerification, Utc::now()).unwrap(),
        "a@x.com"
    );

    assert_eq!(f.verification.confirm(&token).await.unwrap(), ConfirmOutcome::Confirmed);
    assert!(f.accounts.find_by_email("a@x.com").await.unwrap().unwrap().is_verified);
    assert_eq!(
        f.verification.confirm(&token).await.unwrap(),
        ConfirmOutcome::AlreadyConfirmed
    );
}

#[tokio::test]
async fn test_register_creates_profile() {
    let f = fixture();

    let account = f
        .service
        .register(new_account("a@x.com"), "http://h/")
        .await
        .unwrap();

    let profile = f.profiles.find_by_account(account.id).await.unwrap().unwrap();
    assert_eq!(profile.avatar_path, "default_avatar.png");
    assert_eq!(account.avatar.as_deref(), Some("https://avatars.test/a@x.com"));
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let f = fixture();
    f.service.register(new_account("a@x.com"), "http://h/").await.unwrap();

    let result = f.service.register(new_account("A@X.com"), "http://h/").await;

    assert!(matches!(result, Err(DomainError::Conflict { .. })));
    assert_eq!(f.accounts.count().await, 1);
    assert_eq!(f.transport.sent().len(), 1);
}

#[tokio::test]
async fn test_register_validates_input() {
    let f = fixture();

    let bad_email = new_account("not-an-email");
    let mut short_name = new_account("a@x.com");
    short_name.username = "bob".to_string();
    let mut short_password = new_account("a@x.com");
    short_password.password = "12345".to_string();

    for input in [bad_email, short_name, short_password] {
        let result = f.service.register(input, "http://h/").await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }
    assert_eq!(f.accounts.count().await, 0);
}

#[tokio::test]
async fn test_avatar_lookup_failure_is_soft() {
    let f = fixture_with(false, true);

    let account = f
        .service
        .register(new_account("a@x.com"), "http://h/")
        .await
        .unwrap();

    assert!(account.avatar.is_none());
}

#[tokio::test]
async fn test_dispatch_failure_after_persisting() {
    let f = fixture_with(true, false);

    let result = f.service.register(new_account("a@x.com"), "http://h/").await;

    assert!(matches!(
        result,
        Err(DomainError::Dispatch(DispatchError::Connection(_)))
    ));
    assert_eq!(f.accounts.count().await, 1);
}

#[tokio::test]
async fn test_request_confirmation_recovers_from_dispatch_failure() {
    let f = fixture_with(true, false);
    let result = f.service.register(new_account("a@x.com"), "http://h/").await;
    assert!(matches!(result, Err(DomainError::Dispatch(_))));

    // Still down: the request fails the same way and nothing is recorded
    let retry = f.service.request_confirmation("a@x.com", "http://h/").await;
    assert!(matches!(retry, Err(DomainError::Dispatch(_))));
    assert!(f.transport.sent().is_empty());

    f.transport.set_failing(false);
    let outcome = f.service.request_confirmation("A@X.com", "http://h/").await.unwrap();
    assert_eq!(outcome, ResendOutcome::Sent);

    let sent = f.transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipient, "a@x.com");
    let token = extract_token(&sent[0].html_body);
    assert_eq!(f.verification.confirm(&token).await.unwrap(), ConfirmOutcome::Confirmed);
    assert!(f.service.login("a@x.com", "secret123").await.is_ok());
}

#[tokio::test]
async fn test_request_confirmation_for_verified_or_unknown_sends_nothing() {
    let f = fixture();
    registered(&f, "a@x.com").await;
    let before = f.transport.sent().len();

    let verified = f.service.request_confirmation("a@x.com", "http://h/").await.unwrap();
    let unknown = f.service.request_confirmation("ghost@x.com", "http://h/").await.unwrap();

    assert_eq!(verified, ResendOutcome::AlreadyConfirmed);
    assert_eq!(unknown, ResendOutcome::UnknownEmail);
    assert_eq!(f.transport.sent().len(), before);
}

#[tokio::test]
async fn test_login_requires_confirmed_email() {
    let f = fixture();
    f.service.register(new_account("a@x.com"), "http://h/").await.unwrap();

    let result = f.service.login("a@x.com", "secret123").await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::EmailNotConfirmed))
    ));
}

#[tokio::test]
async fn test_login_bad_credentials() {
    let f = fixture();
    registered(&f, "a@x.com").await;

    let wrong_password = f.service.login("a@x.com", "wrong-password").await;
    let unknown_email = f.service.login("b@x.com", "secret123").await;

    assert!(matches!(
        wrong_password,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));
    assert!(matches!(
        unknown_email,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    ));
}

#[tokio::test]
async fn test_login_persists_refresh_token() {
    let f = fixture();
    registered(&f, "a@x.com").await;

    let pair = f.service.login("A@x.com", "secret123").await.unwrap();

    assert_eq!(pair.token_type, "bearer");
    let stored = f.accounts.find_by_email("a@x.com").await.unwrap().unwrap();
    assert_eq!(stored.refresh_token.as_deref(), Some(pair.refresh_token.as_str()));
}

#[tokio::test]
async fn test_login_with_longest_email() {
    let f = fixture();
    let email = format!(
        "{}@{}.{}.{}.com",
        "a".repeat(64),
        "b".repeat(63),
        "c".repeat(63),
        "d".repeat(58)
    );
    assert_eq!(email.len(), 255);
    registered(&f, &email).await;

    let pair = f.service.login(&email, "secret123").await.unwrap();

    // Longer than the original 512 character column
    assert!(pair.refresh_token.len() > 512);
    let stored = f.accounts.find_by_email(&email).await.unwrap().unwrap();
    assert_eq!(stored.refresh_token.as_deref(), Some(pair.refresh_token.as_str()));
    let rotated = f.service.refresh(&pair.refresh_token).await.unwrap();
    assert_ne!(rotated.refresh_token, pair.refresh_token);
}

#[tokio::test]
async fn test_refresh_rotates_tokens() {
    let f = fixture();
    registered(&f, "a@x.com").await;
    let first = f.service.login("a@x.com", "secret123").await.unwrap();

    let second = f.service.refresh(&first.refresh_token).await.unwrap();

    assert_ne!(second.refresh_token, first.refresh_token);
    let stored = f.accounts.find_by_email("a@x.com").await.unwrap().unwrap();
    assert_eq!(stored.refresh_token.as_deref(), Some(second.refresh_token.as_str()));
}

#[tokio::test]
async fn test_reused_refresh_token_revokes_chain() {
    let f = fixture();
    registered(&f, "a@x.com").await;
    let first = f.service.login("a@x.com", "secret123").await.unwrap();
    let second = f.service.refresh(&first.refresh_token).await.unwrap();

    let replay = f.service.refresh(&first.refresh_token).await;
    assert!(matches!(replay, Err(DomainError::Token(TokenError::TokenRevoked))));

    let after = f.service.refresh(&second.refresh_token).await;
    assert!(matches!(after, Err(DomainError::Token(TokenError::TokenRevoked))));
}

#[tokio::test]
async fn test_refresh_after_logout_is_revoked() {
    let f = fixture();
    registered(&f, "a@x.com").await;
    let pair = f.service.login("a@x.com", "secret123").await.unwrap();

    f.service.logout("a@x.com").await.unwrap();

    let result = f.service.refresh(&pair.refresh_token).await;
    assert!(matches!(result, Err(DomainError::Token(TokenError::TokenRevoked))));
}

#[tokio::test]
async fn test_refresh_with_access_token_is_wrong_kind() {
    let f = fixture();
    registered(&f, "a@x.com").await;
    let pair = f.service.login("a@x.com", "secret123").await.unwrap();

    let result = f.service.refresh(&pair.access_token).await;

    assert!(matches!(
        result,
        Err(DomainError::Token(TokenError::WrongKind { .. }))
    ));
}

#[tokio::test]
async fn test_refresh_expired_token() {
    let f = fixture();
    registered(&f, "a@x.com").await;
    let pair = f.service.login("a@x.com", "secret123").await.unwrap();

    let later = Utc::now() + Duration::days(8);
    let result = f.service.refresh_at(&pair.refresh_token, later).await;

    assert!(matches!(result, Err(DomainError::Token(TokenError::TokenExpired))));
}

#[tokio::test]
async fn test_current_account_unknown() {
    let f = fixture();

    let result = f.service.current_account("ghost@x.com").await;

    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}
