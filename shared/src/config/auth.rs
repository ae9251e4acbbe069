//! Authentication configuration

use serde::{Deserialize, Serialize};

/// Secret used when `JWT_SECRET` is not set in development
pub const DEVELOPMENT_JWT_SECRET: &str = "development-secret-please-change-in-production";

/// Minimum secret length accepted outside development (HS256 key size)
pub const MIN_SECRET_BYTES: usize = 32;

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Shared HMAC secret for signing tokens
    pub secret: String,

    /// Token lifetime in seconds
    #[serde(default = "default_expiration_seconds")]
    pub expiration_seconds: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEVELOPMENT_JWT_SECRET),
            expiration_seconds: default_expiration_seconds(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set token expiry in seconds
    pub fn with_expiration_seconds(mut self, seconds: i64) -> Self {
        self.expiration_seconds = seconds;
        self
    }

    /// Check if using the development secret
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEVELOPMENT_JWT_SECRET
    }

    /// Check whether the secret is strong enough for HS256
    pub fn has_strong_secret(&self) -> bool {
        self.secret.len() >= MIN_SECRET_BYTES && !self.is_using_default_secret()
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// bcrypt work factor
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET")
            .unwrap_or_else(|_| DEVELOPMENT_JWT_SECRET.to_string());
        let expiration_seconds = std::env::var("JWT_EXPIRATION_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_expiration_seconds);
        let bcrypt_cost = std::env::var("BCRYPT_COST")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_bcrypt_cost);

        Self {
            jwt: JwtConfig {
                secret,
                expiration_seconds,
            },
            bcrypt_cost,
        }
    }
}

fn default_expiration_seconds() -> i64 {
    86_400 // 24 hours
}

fn default_bcrypt_cost() -> u32 {
    12
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_config_default() {
        let config = JwtConfig::default();
        assert_eq!(config.expiration_seconds, 86_400);
        assert!(config.is_using_default_secret());
        assert!(!config.has_strong_secret());
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("0123456789abcdef0123456789abcdef")
            .with_expiration_seconds(60);

        assert_eq!(config.expiration_seconds, 60);
        assert!(!config.is_using_default_secret());
        assert!(config.has_strong_secret());
    }

    #[test]
    fn test_short_secret_is_weak() {
        assert!(!JwtConfig::new("short").has_strong_secret());
    }

    #[test]
    fn test_auth_config_default_cost() {
        let config: AuthConfig = serde_json::from_str(r#"{"jwt":{"secret":"s"}}"#).unwrap();
        assert_eq!(config.bcrypt_cost, 12);
        assert_eq!(config.jwt.expiration_seconds, 86_400);
    }
}
