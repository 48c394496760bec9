use actix_web::{web, HttpResponse};

use cm_core::repositories::{AccountRepository, ProfileRepository};
use cm_core::services::{AvatarLocator, AvatarStore, MailTransport};

use crate::app::AppState;
use crate::dto::auth::{LoginForm, TokenPairResponse};
use crate::handlers::error::handle_domain_error;

/// Handler for POST /api/auth/login
///
/// Takes an OAuth2 password form where `username` is the account email.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "access_token": "eyJ...",
///     "refresh_token": "eyJ...",
///     "token_type": "bearer",
///     "expires_in": 900
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Invalid email or password, or email not confirmed
pub async fn login<A, P, M, L, S>(
    state: web::Data<AppState<A, P, M, L, S>>,
    form: web::Form<LoginForm>,
) -> HttpResponse
where
    A: AccountRepository + 'static,
    P: ProfileRepository + 'static,
    M: MailTransport + 'static,
    L: AvatarLocator + 'static,
    S: AvatarStore + 'static,
{
    match state.account_service.login(&form.username, &form.password).await {
        Ok(pair) => HttpResponse::Ok().json(TokenPairResponse::from(pair)),
        Err(error) => handle_domain_error(&error),
    }
}
