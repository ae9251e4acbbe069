//! Configuration for the token service

use notifier_shared::config::auth::DEVELOPMENT_JWT_SECRET;
use notifier_shared::JwtConfig;

use crate::domain::entities::token::DEFAULT_TOKEN_TTL_SECONDS;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// HMAC signing secret, shared by every worker for the process lifetime
    pub jwt_secret: String,
    /// Token lifetime in seconds
    pub ttl_seconds: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEVELOPMENT_JWT_SECRET.to_string(),
            ttl_seconds: DEFAULT_TOKEN_TTL_SECONDS,
        }
    }
}

impl TokenServiceConfig {
    pub fn new(jwt_secret: impl Into<String>, ttl_seconds: i64) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            ttl_seconds,
        }
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(jwt: &JwtConfig) -> Self {
        Self::new(jwt.secret.clone(), jwt.expiration_seconds)
    }
}
