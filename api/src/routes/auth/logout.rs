use actix_web::{web, HttpResponse};

use cm_core::repositories::{AccountRepository, ProfileRepository};
use cm_core::services::{AvatarLocator, AvatarStore, MailTransport};

use crate::app::AppState;
use crate::dto::auth::MessageResponse;
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

/// Handler for POST /api/auth/logout
///
/// Clears the stored refresh token of the authenticated account. Access tokens
/// stay valid until they expire.
///
/// # Headers
///
/// ```text
/// Authorization: Bearer {access_token}
/// ```
pub async fn logout<A, P, M, L, S>(
    state: web::Data<AppState<A, P, M, L, S>>,
    auth: AuthContext,
) -> HttpResponse
where
    A: AccountRepository + 'static,
    P: ProfileRepository + 'static,
    M: MailTransport + 'static,
    L: AvatarLocator + 'static,
    S: AvatarStore + 'static,
{
    match state.account_service.logout(&auth.email).await {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new("Logged out successfully")),
        Err(error) => handle_domain_error(&error),
    }
}
