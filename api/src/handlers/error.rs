//! Maps domain failures onto HTTP responses carrying the shared error envelope.

use actix_web::{
    error::{InternalError, JsonPayloadError, UrlencodedError},
    http::StatusCode,
    HttpRequest, HttpResponse,
};
use cm_core::errors::{AuthError, AvatarError, DomainError, TokenError};
use validator::ValidationErrors;

use crate::dto::error::{error_codes, ErrorResponse};

/// Message returned when the verification email could not be handed to the mail server
pub const MAIL_FAILURE_MESSAGE: &str = "Email could not be sent.";

/// Converts a domain error into an HTTP response.
///
/// Server-side failures are logged at `error`, client errors at `debug`.
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let (status, body) = map_domain_error(error);

    if status.is_server_error() {
        log::error!("Request failed with {}: {}", status.as_u16(), error);
    } else {
        log::debug!("Request rejected with {}: {}", status.as_u16(), error);
    }

    HttpResponse::build(status).json(body)
}

/// Status code and envelope for a domain error
pub fn map_domain_error(error: &DomainError) -> (StatusCode, ErrorResponse) {
    match error {
        DomainError::Validation { message } => (
            StatusCode::UNPROCESSABLE_ENTITY,
            ErrorResponse::new(error_codes::VALIDATION_ERROR, message.as_str()),
        ),
        DomainError::NotFound { resource } => (
            StatusCode::NOT_FOUND,
            ErrorResponse::new(error_codes::NOT_FOUND, format!("{} not found", resource)),
        ),
        DomainError::Conflict { message } => (
            StatusCode::CONFLICT,
            ErrorResponse::new(error_codes::CONFLICT, message.as_str()),
        ),
        DomainError::Auth(auth_error) => map_auth_error(auth_error),
        DomainError::Token(token_error) => map_token_error(token_error),
        DomainError::Dispatch(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse::new(error_codes::MAIL_ERROR, MAIL_FAILURE_MESSAGE),
        ),
        DomainError::Avatar(AvatarError::Decode(reason)) => (
            StatusCode::BAD_REQUEST,
            ErrorResponse::new(error_codes::IMAGE_INVALID, "Uploaded file is not a supported image")
                .add_detail("reason", reason),
        ),
        DomainError::Avatar(_) | DomainError::Internal { .. } => internal_error(),
    }
}

fn map_auth_error(error: &AuthError) -> (StatusCode, ErrorResponse) {
    let body = match error {
        AuthError::InvalidCredentials => {
            ErrorResponse::new(error_codes::INVALID_CREDENTIALS, "Invalid email or password")
        }
        AuthError::EmailNotConfirmed => {
            ErrorResponse::new(error_codes::EMAIL_NOT_CONFIRMED, "Email not confirmed")
        }
    };
    (StatusCode::UNAUTHORIZED, body)
}

fn map_token_error(error: &TokenError) -> (StatusCode, ErrorResponse) {
    let body = match error {
        TokenError::TokenExpired => ErrorResponse::new(error_codes::TOKEN_EXPIRED, "Token has expired"),
        TokenError::TokenMalformed => {
            ErrorResponse::new(error_codes::TOKEN_INVALID, "Could not validate credentials")
        }
        TokenError::WrongKind { expected, actual } => {
            ErrorResponse::new(error_codes::TOKEN_WRONG_KIND, "Invalid scope for token")
                .add_detail("expected", expected.as_str())
                .add_detail("actual", actual.as_str())
        }
        TokenError::TokenRevoked => {
            ErrorResponse::new(error_codes::TOKEN_REVOKED, "Invalid refresh token")
        }
        TokenError::TokenGenerationFailed => return internal_error(),
    };
    (StatusCode::UNAUTHORIZED, body)
}

fn internal_error() -> (StatusCode, ErrorResponse) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorResponse::new(error_codes::INTERNAL_ERROR, "Internal server error"),
    )
}

/// 422 response listing every failing field of a validated request body
pub fn handle_validation_errors(errors: &ValidationErrors) -> HttpResponse {
    let mut body = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Request validation failed");

    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        body = body.add_detail(field, messages);
    }

    HttpResponse::UnprocessableEntity().json(body)
}

/// 401 response for requests without a usable bearer token
pub fn unauthenticated() -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorResponse::new(
        error_codes::UNAUTHORIZED,
        "Not authenticated",
    ))
}

/// Error handler for `web::JsonConfig`: malformed bodies become 422 envelopes
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::UnprocessableEntity().json(
        ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid JSON body")
            .add_detail("reason", err.to_string()),
    );
    InternalError::from_response(err, response).into()
}

/// Error handler for `web::FormConfig`: malformed forms become 422 envelopes
pub fn form_error_handler(err: UrlencodedError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::UnprocessableEntity().json(
        ErrorResponse::new(error_codes::VALIDATION_ERROR, "Invalid form body")
            .add_detail("reason", err.to_string()),
    );
    InternalError::from_response(err, response).into()
}
