pub mod auth;
pub mod cors;

pub use auth::{AuthContext, JwtAuth, RequireAuth};
pub use cors::create_cors;
