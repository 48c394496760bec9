use actix_web::{web, HttpResponse};

use cm_core::repositories::{AccountRepository, ProfileRepository};
use cm_core::services::{AvatarLocator, AvatarStore, MailTransport};

use crate::app::AppState;
use crate::dto::user::AccountView;
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

/// Handler for GET /api/users/me
pub async fn me<A, P, M, L, S>(
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
    match state.account_service.current_account(&auth.email).await {
        Ok(account) => HttpResponse::Ok().json(AccountView::from(account)),
        Err(error) => handle_domain_error(&error),
    }
}
