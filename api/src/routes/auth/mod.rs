//! Authentication route handlers
//!
//! Registration and login are the only endpoints reachable without a token.
//! Both answer with `{token, student}`.

pub mod login;
pub mod register;

use actix_web::web;

pub use login::login;
pub use register::register;

/// Registers `/register` and `/login` on the `/auth` scope
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(register))
        .route("/login", web::post().to(login));
}
