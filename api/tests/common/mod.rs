//! Shared wiring for the HTTP integration tests.
#![allow(dead_code, unused_macros)]

use std::io::Cursor;
use std::sync::Arc;

use actix_web::web;
use image::{ImageFormat, RgbImage};

use cm_api::app::{AppState, ServiceConfigs};
use cm_core::services::verification::{OutboundMail, CONFIRM_EMAIL_PATH};
use cm_core::services::{
    AccountServiceConfig, AvatarServiceConfig, TokenServiceConfig, VerificationServiceConfig,
};
use cm_infra::{
    GravatarLocator, InMemoryAccountRepository, InMemoryAvatarStore, InMemoryProfileRepository,
    RecordingMailTransport,
};

pub const MAX_PAYLOAD_SIZE: usize = 4 * 1024 * 1024;
pub const PASSWORD: &str = "secret123";
pub const PUBLIC_URL: &str = "https://contacts.example.test";

pub type TestState = AppState<
    InMemoryAccountRepository,
    InMemoryProfileRepository,
    RecordingMailTransport,
    GravatarLocator,
    InMemoryAvatarStore,
>;

pub struct TestContext {
    pub state: web::Data<TestState>,
    pub accounts: Arc<InMemoryAccountRepository>,
    pub profiles: Arc<InMemoryProfileRepository>,
    pub mail: Arc<RecordingMailTransport>,
    pub avatars: Arc<InMemoryAvatarStore>,
}

pub fn context() -> TestContext {
    context_with_mail(RecordingMailTransport::new())
}

pub fn context_with_mail(mail: RecordingMailTransport) -> TestContext {
    let accounts = Arc::new(InMemoryAccountRepository::new());
    let profiles = Arc::new(InMemoryProfileRepository::new());
    let mail = Arc::new(mail);
    let avatars = Arc::new(InMemoryAvatarStore::new());

    let configs = ServiceConfigs {
        token: TokenServiceConfig {
            jwt_secret: "integration-test-secret".to_string(),
            ..Default::default()
        },
        account: AccountServiceConfig {
            bcrypt_cost: 4,
            ..Default::default()
        },
        verification: VerificationServiceConfig::default(),
        avatar: AvatarServiceConfig::default(),
        public_url: PUBLIC_URL.to_string(),
    };

    let state = AppState::build(
        accounts.clone(),
        profiles.clone(),
        mail.clone(),
        Arc::new(GravatarLocator::default()),
        avatars.clone(),
        configs,
    )
    .expect("services should build");

    TestContext {
        state: web::Data::new(state),
        accounts,
        profiles,
        mail,
        avatars,
    }
}

/// Token embedded in the confirmation link of a recorded email
pub fn confirmation_token(mail: &OutboundMail) -> String {
    let body = &mail.html_body;
    let start = body.find(CONFIRM_EMAIL_PATH).expect("mail should contain a link") + CONFIRM_EMAIL_PATH.len();
    body[start..]
        .chars()
        .take_while(|c| *c != '"' && *c != '<')
        .collect()
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    image_bytes(width, height, ImageFormat::Png)
}

pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    image_bytes(width, height, ImageFormat::Jpeg)
}

fn image_bytes(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let image = RgbImage::from_pixel(width, height, image::Rgb([200, 40, 90]));
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, format).expect("image encoding");
    buffer.into_inner()
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

/// Sends a request and returns the status with the parsed JSON body
macro_rules! call_json {
    ($app:expr, $req:expr) => {{
        let response = actix_web::test::call_service(&$app, $req.to_request()).await;
        let status = response.status();
        let body: serde_json::Value = actix_web::test::read_body_json(response).await;
        (status, body)
    }};
}

/// Registers, confirms and logs in an account; evaluates to the login body
macro_rules! signup_and_login {
    ($app:expr, $ctx:expr, $username:expr, $email:expr) => {{
        let (status, _) = call_json!(
            $app,
            actix_web::test::TestRequest::post()
                .uri("/api/auth/signup")
                .set_json(serde_json::json!({
                    "username": $username,
                    "email": $email,
                    "password": common::PASSWORD,
                }))
        );
        assert_eq!(status, actix_web::http::StatusCode::CREATED);

        let sent = $ctx.mail.sent();
        let token = common::confirmation_token(sent.last().expect("confirmation mail"));
        let (status, _) = call_json!(
            $app,
            actix_web::test::TestRequest::get().uri(&format!("/api/auth/confirm_email/{}", token))
        );
        assert_eq!(status, actix_web::http::StatusCode::OK);

        let (status, body) = call_json!(
            $app,
            actix_web::test::TestRequest::post()
                .uri("/api/auth/login")
                .set_form([("username", $email), ("password", common::PASSWORD)])
        );
        assert_eq!(status, actix_web::http::StatusCode::OK);
        body
    }};
}
