//! JWT authentication middleware for protecting API endpoints.
//!
//! The middleware reads the bearer token from the Authorization header, verifies it
//! as an access token with the `TokenService` registered in app data, and injects an
//! [`AuthContext`] into the request extensions for handlers to extract.

use actix_web::{
    body::{EitherBody, MessageBody},
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    http::header::{HeaderMap, AUTHORIZATION},
    web, Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use chrono::Utc;
use cm_core::{domain::TokenKind, errors::DomainError, services::TokenService};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use crate::handlers::error::{handle_domain_error, unauthenticated};

/// Authenticated caller, injected by [`JwtAuth`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    /// Subject of the access token, the account email
    pub email: String,
}

/// JWT authentication middleware factory
#[derive(Debug, Clone, Copy, Default)]
pub struct JwtAuth;

impl JwtAuth {
    pub fn new() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            match authenticate(&req) {
                Ok(auth_context) => {
                    req.extensions_mut().insert(auth_context);
                    service
                        .call(req)
                        .await
                        .map(ServiceResponse::map_into_left_body)
                }
                // Rejections are answered here so they carry the JSON error envelope
                Err(response) => Ok(req.into_response(response).map_into_right_body()),
            }
        })
    }
}

fn authenticate(req: &ServiceRequest) -> Result<AuthContext, HttpResponse> {
    let token = extract_bearer_token(req.headers()).ok_or_else(unauthenticated)?;

    let token_service = match req.app_data::<web::Data<TokenService>>() {
        Some(service) => service,
        None => {
            log::error!("TokenService is not registered in app data");
            return Err(handle_domain_error(&DomainError::internal(
                "token verification not configured",
            )));
        }
    };

    token_service
        .verify(token, TokenKind::Access, Utc::now())
        .map(|email| AuthContext { email })
        .map_err(|error| handle_domain_error(&error))
}

/// Extracts the token of an `Authorization: Bearer <token>` header
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ErrorUnauthorized("Authentication required"));

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;

    #[::core::prelude::v1::test]
    fn test_extract_bearer_token() {
        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_http_request();
        assert_eq!(extract_bearer_token(req.headers()), Some("test_token_123"));

        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "bearer lower_case"))
            .to_http_request();
        assert_eq!(extract_bearer_token(req.headers()), Some("lower_case"));

        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "test_token_123"))
            .to_http_request();
        assert_eq!(extract_bearer_token(req.headers()), None);

        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Basic dXNlcjpwYXNz"))
            .to_http_request();
        assert_eq!(extract_bearer_token(req.headers()), None);

        let req = test::TestRequest::default().to_http_request();
        assert_eq!(extract_bearer_token(req.headers()), None);
    }

    #[actix_web::test]
    async fn test_auth_context_extractor_requires_middleware() {
        let req = test::TestRequest::default().to_http_request();
        assert!(AuthContext::extract(&req).await.is_err());

        let req = test::TestRequest::default().to_http_request();
        req.extensions_mut().insert(AuthContext {
            email: "alice@example.com".to_string(),
        });
        let context = AuthContext::extract(&req).await.unwrap();
        assert_eq!(context.email, "alice@example.com");
    }
}
