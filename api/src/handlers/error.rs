//! Mapping from domain errors to HTTP responses
//!
//! `status_for` and `error_body` are pure; logging happens once, when an
//! `ApiError` is built from a `DomainError`.

use std::fmt;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use notifier_core::errors::{AuthError, DomainError, TokenError};
use notifier_shared::{error_codes, ErrorResponse};
use validator::ValidationErrors;

use crate::dto::ErrorResponseExt;

const INTERNAL_MESSAGE: &str = "An internal error occurred";
const UNAUTHENTICATED_MESSAGE: &str = "Authentication required";

/// HTTP status for a domain error
pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Auth(AuthError::EmailAlreadyRegistered { .. }) => StatusCode::CONFLICT,
        DomainError::Auth(AuthError::InvalidCredentials | AuthError::Unauthenticated) => {
            StatusCode::UNAUTHORIZED
        }
        DomainError::Token(TokenError::GenerationFailed) => StatusCode::INTERNAL_SERVER_ERROR,
        DomainError::Token(_) => StatusCode::UNAUTHORIZED,
        DomainError::Database { .. } | DomainError::Internal { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Wire body for a domain error
///
/// Token failures all read the same and server-side failures carry a
/// generic message.
pub fn error_body(error: &DomainError) -> ErrorResponse {
    match error {
        DomainError::Validation { message } => {
            ErrorResponse::new(error_codes::VALIDATION_ERROR, message.clone())
        }
        DomainError::NotFound { .. } => ErrorResponse::new(error_codes::NOT_FOUND, error.to_string()),
        DomainError::Auth(AuthError::EmailAlreadyRegistered { .. }) => {
            ErrorResponse::new(error_codes::EMAIL_ALREADY_REGISTERED, error.to_string())
        }
        DomainError::Auth(AuthError::InvalidCredentials) => {
            ErrorResponse::new(error_codes::INVALID_CREDENTIALS, error.to_string())
        }
        DomainError::Auth(AuthError::Unauthenticated)
        | DomainError::Token(
            TokenError::Malformed | TokenError::BadSignature | TokenError::Expired,
        ) => ErrorResponse::new(error_codes::UNAUTHORIZED, UNAUTHENTICATED_MESSAGE),
        DomainError::Token(TokenError::GenerationFailed)
        | DomainError::Database { .. }
        | DomainError::Internal { .. } => {
            ErrorResponse::new(error_codes::INTERNAL_ERROR, INTERNAL_MESSAGE)
        }
    }
}

/// Error returned by handlers and extractors
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, body: ErrorResponse) -> Self {
        Self { status, body }
    }

    /// 401 for a request without an authenticated student
    pub fn unauthenticated() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            ErrorResponse::new(error_codes::UNAUTHORIZED, UNAUTHENTICATED_MESSAGE),
        )
    }

    /// 400 for a body or path that could not be parsed
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            ErrorResponse::new(error_codes::BAD_REQUEST, message),
        )
    }

    pub fn body(&self) -> &ErrorResponse {
        &self.body
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        let status = status_for(&error);
        if status.is_server_error() {
            tracing::error!(error = %error, "Request failed");
        } else {
            tracing::debug!(error = %error, status = status.as_u16(), "Request rejected");
        }
        Self::new(status, error_body(&error))
    }
}

/// Field-level validation failures, one entry per offending field
impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<(String, Vec<String>)> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errors)| {
                let messages = errors
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                (field.to_string(), messages)
            })
            .collect();
        fields.sort();

        let message = fields
            .iter()
            .flat_map(|(_, messages)| messages.iter().cloned())
            .collect::<Vec<_>>()
            .join("; ");

        let mut body = ErrorResponse::new(error_codes::VALIDATION_ERROR, message);
        for (field, messages) in fields {
            body = body.add_detail(field, messages);
        }
        Self::new(StatusCode::BAD_REQUEST, body)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.body.error, self.body.message)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        self.body.to_response(self.status)
    }
}
