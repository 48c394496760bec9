use actix_web::{web, HttpResponse};
use validator::Validate;

use cm_core::repositories::{AccountRepository, ProfileRepository};
use cm_core::services::{AvatarLocator, AvatarStore, MailTransport, ResendOutcome};

use crate::app::AppState;
use crate::dto::auth::{EmailRequest, MessageResponse};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};

pub const CHECK_EMAIL_MESSAGE: &str = "Check your email for confirmation.";
pub const ALREADY_CONFIRMED_MESSAGE: &str = "Your email is already confirmed";

/// Handler for POST /api/auth/request_email
///
/// Sends another confirmation link to an unverified account. Unknown
/// addresses get the same answer as unverified ones.
///
/// # Request Body
///
/// ```json
/// { "email": "string" }
/// ```
///
/// ## Errors
/// - 422 Unprocessable Entity: Invalid email
/// - 500 Internal Server Error: The confirmation email could not be sent
pub async fn request_email<A, P, M, L, S>(
    state: web::Data<AppState<A, P, M, L, S>>,
    request: web::Json<EmailRequest>,
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
        .request_confirmation(&request.email, &state.public_url)
        .await
    {
        Ok(ResendOutcome::AlreadyConfirmed) => {
            HttpResponse::Ok().json(MessageResponse::new(ALREADY_CONFIRMED_MESSAGE))
        }
        Ok(ResendOutcome::Sent | ResendOutcome::UnknownEmail) => {
            HttpResponse::Ok().json(MessageResponse::new(CHECK_EMAIL_MESSAGE))
        }
        Err(error) => handle_domain_error(&error),
    }
}
