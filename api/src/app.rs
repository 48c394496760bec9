//! Application state and factory
//!
//! This module wires the core services into the shared application state
//! and provides the factory for creating the Actix-web application.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web, App, Error, HttpResponse,
};
use tracing_actix_web::TracingLogger;

use cm_core::errors::DomainError;
use cm_core::repositories::{AccountRepository, ProfileRepository};
use cm_core::services::{
    AccountService, AccountServiceConfig, AvatarLocator, AvatarService, AvatarServiceConfig,
    AvatarStore, MailTransport, ProfileService, TokenService, TokenServiceConfig,
    VerificationService, VerificationServiceConfig,
};
use cm_shared::config::{AppConfig, Environment};

use crate::handlers::error::{form_error_handler, json_error_handler};
use crate::middleware::{auth::JwtAuth, cors::create_cors};
use crate::routes::{auth, users};

/// Services shared by every request handler
pub struct AppState<A, P, M, L, S>
where
    A: AccountRepository,
    P: ProfileRepository,
    M: MailTransport,
    L: AvatarLocator,
    S: AvatarStore,
{
    pub account_service: Arc<AccountService<A, P, M, L>>,
    pub verification_service: Arc<VerificationService<M, A>>,
    pub profile_service: Arc<ProfileService<A, P, S>>,
    pub token_service: Arc<TokenService>,
    /// Base URL confirmation links are built on
    pub public_url: String,
}

/// Per-service configuration derived from [`AppConfig`]
#[derive(Debug, Clone)]
pub struct ServiceConfigs {
    pub token: TokenServiceConfig,
    pub account: AccountServiceConfig,
    pub verification: VerificationServiceConfig,
    pub avatar: AvatarServiceConfig,
    /// Configured public base URL, see [`ServerConfig::public_url`](cm_shared::config::ServerConfig::public_url)
    pub public_url: String,
}

impl ServiceConfigs {
    pub fn from_app_config(config: &AppConfig) -> Result<Self, DomainError> {
        Ok(Self {
            token: TokenServiceConfig::from_jwt_config(&config.jwt)?,
            account: AccountServiceConfig {
                default_avatar: config.avatar.default_avatar.clone(),
                ..Default::default()
            },
            verification: VerificationServiceConfig::default(),
            avatar: AvatarServiceConfig::from(&config.avatar),
            public_url: config.server.public_url(),
        })
    }
}

impl<A, P, M, L, S> AppState<A, P, M, L, S>
where
    A: AccountRepository,
    P: ProfileRepository,
    M: MailTransport,
    L: AvatarLocator,
    S: AvatarStore,
{
    /// Builds every service on top of the given storage and transport collaborators
    pub fn build(
        accounts: Arc<A>,
        profiles: Arc<P>,
        mail_transport: Arc<M>,
        avatar_locator: Arc<L>,
        avatar_store: Arc<S>,
        configs: ServiceConfigs,
    ) -> Result<Self, DomainError> {
        let token_service = Arc::new(TokenService::new(configs.token)?);

        let verification_service = Arc::new(VerificationService::new(
            token_service.clone(),
            mail_transport,
            accounts.clone(),
            configs.verification,
        ));

        let account_service = Arc::new(AccountService::new(
            accounts.clone(),
            profiles.clone(),
            token_service.clone(),
            verification_service.clone(),
            avatar_locator,
            configs.account,
        ));

        let avatar_service = Arc::new(AvatarService::new(avatar_store, configs.avatar));
        let profile_service = Arc::new(ProfileService::new(accounts, profiles, avatar_service));

        Ok(Self {
            account_service,
            verification_service,
            profile_service,
            token_service,
            public_url: configs.public_url,
        })
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<A, P, M, L, S>(
    app_state: web::Data<AppState<A, P, M, L, S>>,
    environment: Environment,
    max_payload_size: usize,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    A: AccountRepository + 'static,
    P: ProfileRepository + 'static,
    M: MailTransport + 'static,
    L: AvatarLocator + 'static,
    S: AvatarStore + 'static,
{
    // JwtAuth looks the token service up by type
    let token_service = web::Data::from(app_state.token_service.clone());

    App::new()
        .app_data(app_state)
        .app_data(token_service)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::FormConfig::default().error_handler(form_error_handler))
        .app_data(web::PayloadConfig::new(max_payload_size))
        // Middleware order: CORS runs inside the request span
        .wrap(create_cors(environment))
        .wrap(TracingLogger::default())
        .route("/", web::get().to(index))
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api")
                .service(
                    web::scope("/auth")
                        .route("/signup", web::post().to(auth::signup::<A, P, M, L, S>))
                        .route("/register", web::post().to(auth::signup::<A, P, M, L, S>))
                        .route(
                            "/confirm_email/{token}",
                            web::get().to(auth::confirm_email::<A, P, M, L, S>),
                        )
                        .route(
                            "/request_email",
                            web::post().to(auth::request_email::<A, P, M, L, S>),
                        )
                        .route("/login", web::post().to(auth::login::<A, P, M, L, S>))
                        .route(
                            "/refresh_token",
                            web::get().to(auth::refresh_token::<A, P, M, L, S>),
                        )
                        .route(
                            "/logout",
                            web::post()
                                .to(auth::logout::<A, P, M, L, S>)
                                .wrap(JwtAuth::new()),
                        ),
                )
                .service(
                    web::scope("/users")
                        .route(
                            "/me",
                            web::get()
                                .to(users::me::<A, P, M, L, S>)
                                .wrap(JwtAuth::new()),
                        )
                        .route(
                            "/profile",
                            web::get()
                                .to(users::get_profile::<A, P, M, L, S>)
                                .wrap(JwtAuth::new()),
                        )
                        .route(
                            "/profile",
                            web::put()
                                .to(users::update_profile::<A, P, M, L, S>)
                                .wrap(JwtAuth::new()),
                        )
                        .route(
                            "/avatar",
                            web::get()
                                .to(users::get_avatar::<A, P, M, L, S>)
                                .wrap(JwtAuth::new()),
                        )
                        .route(
                            "/avatar",
                            web::put()
                                .to(users::upload_avatar::<A, P, M, L, S>)
                                .wrap(JwtAuth::new()),
                        ),
                ),
        )
        .default_service(web::route().to(not_found))
}

async fn index() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "message": "Contacts API",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "contacts-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "NOT_FOUND",
        "message": "The requested resource was not found"
    }))
}
