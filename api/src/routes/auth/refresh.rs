use actix_web::{web, HttpRequest, HttpResponse};

use cm_core::repositories::{AccountRepository, ProfileRepository};
use cm_core::services::{AvatarLocator, AvatarStore, MailTransport};

use crate::app::AppState;
use crate::dto::auth::TokenPairResponse;
use crate::handlers::error::{handle_domain_error, unauthenticated};
use crate::middleware::auth::extract_bearer_token;

/// Handler for GET /api/auth/refresh_token
///
/// The refresh token travels in the Authorization header. A token that does not
/// match the one stored for the account revokes the stored one, so a replayed
/// token also locks out whoever holds the newer pair.
///
/// ## Errors
/// - 401 Unauthorized: Missing, expired, revoked or non-refresh token
/// - 404 Not Found: The token names an unknown account
pub async fn refresh_token<A, P, M, L, S>(
    req: HttpRequest,
    state: web::Data<AppState<A, P, M, L, S>>,
) -> HttpResponse
where
    A: AccountRepository + 'static,
    P: ProfileRepository + 'static,
    M: MailTransport + 'static,
    L: AvatarLocator + 'static,
    S: AvatarStore + 'static,
{
    let token = match extract_bearer_token(req.headers()) {
        Some(token) => token,
        None => return unauthenticated(),
    };

    match state.account_service.refresh(token).await {
        Ok(pair) => HttpResponse::Ok().json(TokenPairResponse::from(pair)),
        Err(error) => handle_domain_error(&error),
    }
}
