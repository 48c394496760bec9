use actix_web::{web, HttpResponse};
use validator::Validate;

use cm_core::repositories::{AccountRepository, ProfileRepository};
use cm_core::services::{AvatarLocator, AvatarStore, MailTransport};

use crate::app::AppState;
use crate::dto::user::{ProfileUpdateRequest, ProfileView};
use crate::handlers::error::{handle_domain_error, handle_validation_errors};
use crate::middleware::auth::AuthContext;

/// Handler for GET /api/users/profile
pub async fn get_profile<A, P, M, L, S>(
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
    match state.profile_service.profile(&auth.email).await {
        Ok(profile) => HttpResponse::Ok().json(ProfileView::from(profile)),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for PUT /api/users/profile
///
/// # Request Body
///
/// ```json
/// {
///     "first_name": "string (optional)",
///     "last_name": "string (optional)",
///     "phone_number": "string, at most 15 chars (optional)",
///     "birth_date": "YYYY-MM-DD (optional)"
/// }
/// ```
pub async fn update_profile<A, P, M, L, S>(
    state: web::Data<AppState<A, P, M, L, S>>,
    auth: AuthContext,
    request: web::Json<ProfileUpdateRequest>,
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

    match state.profile_service.update_profile(&auth.email, request.into()).await {
        Ok(profile) => HttpResponse::Ok().json(ProfileView::from(profile)),
        Err(error) => handle_domain_error(&error),
    }
}
