//! Error body as sent over HTTP

use actix_web::{http::StatusCode, HttpResponse};

pub use notifier_shared::types::response::ErrorResponse;

/// Renders an [`ErrorResponse`] with a given status
pub trait ErrorResponseExt {
    fn to_response(&self, status: StatusCode) -> HttpResponse;
}

impl ErrorResponseExt for ErrorResponse {
    fn to_response(&self, status: StatusCode) -> HttpResponse {
        HttpResponse::build(status).json(self)
    }
}
