use actix_web::{web, HttpResponse};

use cm_core::repositories::{AccountRepository, ProfileRepository};
use cm_core::services::{AvatarLocator, AvatarStore, MailTransport};

use crate::app::AppState;
use crate::dto::user::AvatarUploadResponse;
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

/// Handler for PUT /api/users/avatar
///
/// The request body is the raw image (PNG, JPEG or WebP). Images larger than
/// the configured bound are downscaled preserving aspect ratio; the stored path
/// is recorded on the caller's profile.
///
/// ## Errors
/// - 400 Bad Request: The body is not a decodable image
/// - 413 Payload Too Large: The body exceeds the server payload limit
pub async fn upload_avatar<A, P, M, L, S>(
    state: web::Data<AppState<A, P, M, L, S>>,
    auth: AuthContext,
    body: web::Bytes,
) -> HttpResponse
where
    A: AccountRepository + 'static,
    P: ProfileRepository + 'static,
    M: MailTransport + 'static,
    L: AvatarLocator + 'static,
    S: AvatarStore + 'static,
{
    match state.profile_service.upload_avatar(&auth.email, body.to_vec()).await {
        Ok((_, stored)) => HttpResponse::Ok().json(AvatarUploadResponse::from(stored)),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for GET /api/users/avatar
///
/// Streams the caller's uploaded avatar with its sniffed content type.
///
/// ## Errors
/// - 404 Not Found: No avatar has been uploaded
pub async fn get_avatar<A, P, M, L, S>(
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
    match state.profile_service.avatar(&auth.email).await {
        Ok(image) => HttpResponse::Ok()
            .content_type(image.content_type)
            .body(image.bytes),
        Err(error) => handle_domain_error(&error),
    }
}
