use actix_web::{web, HttpResponse};
use validator::Validate;

use cm_core::repositories::{AccountRepository, ProfileRepository};
use cm_core::services::{AvatarLocator, AvatarStore, MailTransport};

use crate::app::AppState;
use crate::dto::auth::{SignupRequest, SignupResponse};
use crate::dto::user::AccountView;
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

/// Handler for POST /api/auth/signup (also served at /api/auth/register)
///
/// Creates an unverified account and emails a confirmation link built on the
/// configured public URL. Request headers such as `Host` or
/// `X-Forwarded-Host` never reach the link.
///
/// # Request Body
///
/// ```json
/// {
///     "username": "string (5-100 chars)",
///     "email": "string",
///     "password": "string (6-25 chars)"
/// }
/// ```
///
/// ## Errors
/// - 409 Conflict: Account already exists
/// - 422 Unprocessable Entity: Invalid fields
/// - 500 Internal Server Error: The confirmation email could not be sent
pub async fn signup<A, P, M, L, S>(
    state: web::Data<AppState<A, P, M, L, S>>,
    request: web::Json<SignupRequest>,
) -> HttpResponse
where
    A: AccountRepository + 'static,
    P: ProfileRepository + 'static,
    M: MailTransport + 'static,
    L: AvatarLocator + 'static,
    S: AvatarStore + 'static,
{
    let request = request.into_inner();
    if let Err(errors) = request.validate() {
        return handle_validation_errors(&errors);
    }

    match state
        .account_service
        .register(request.into(), &state.public_url)
        .await
    {
        Ok(account) => HttpResponse::Created().json(SignupResponse::new(AccountView::from(account))),
        Err(error) => handle_domain_error(&error),
    }
}
