//! CORS middleware configuration for cross-origin requests.
//!
//! The browser front ends (Ionic dev server on 8100, Angular on 4200 by
//! default) call the API from another origin. Origins come from
//! `CORS_ALLOWED_ORIGINS`; nothing is allowed implicitly.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use notifier_shared::CorsConfig;

/// Creates a CORS middleware instance from configuration
pub fn create_cors(config: &CorsConfig) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
            header::HeaderName::from_static("x-requested-with"),
        ])
        .max_age(config.max_age);

    for origin in &config.allowed_origins {
        tracing::debug!(origin = %origin, "Allowing CORS origin");
        cors = cors.allowed_origin(origin);
    }

    if config.allow_credentials {
        cors = cors.supports_credentials();
    }

    cors
}
