use actix_web::{web, HttpResponse};

use cm_core::repositories::{AccountRepository, ProfileRepository};
use cm_core::services::{AvatarLocator, AvatarStore, ConfirmOutcome, MailTransport};

use crate::app::AppState;
use crate::dto::auth::MessageResponse;
use crate::handlers::error::handle_domain_error;

use super::request_email::ALREADY_CONFIRMED_MESSAGE;

/// Handler for GET /api/auth/confirm_email/{token}
///
/// Confirming twice is not an error; the second call reports that the email
/// was already confirmed.
///
/// ## Errors
/// - 401 Unauthorized: Expired, malformed or non-email token
/// - 404 Not Found: The token names an unknown account
pub async fn confirm_email<A, P, M, L, S>(
    state: web::Data<AppState<A, P, M, L, S>>,
    token: web::Path<String>,
) -> HttpResponse
where
    A: AccountRepository + 'static,
    P: ProfileRepository + 'static,
    M: MailTransport + 'static,
    L: AvatarLocator + 'static,
    S: AvatarStore + 'static,
{
    match state.verification_service.confirm(&token).await {
        Ok(ConfirmOutcome::Confirmed) => {
            HttpResponse::Ok().json(MessageResponse::new("Email confirmed"))
        }
        Ok(ConfirmOutcome::AlreadyConfirmed) => {
            HttpResponse::Ok().json(MessageResponse::new(ALREADY_CONFIRMED_MESSAGE))
        }
        Err(error) => handle_domain_error(&error),
    }
}
