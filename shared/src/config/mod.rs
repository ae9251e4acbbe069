//! Configuration module with business-specific sub-modules
//!
//! - `auth` - JWT and password hashing configuration
//! - `database` - Database connection and pool configuration
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server and CORS configuration

pub mod auth;
pub mod database;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};

pub use auth::{AuthConfig, JwtConfig};
pub use database::DatabaseConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::{CorsConfig, ServerConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration problems detected at startup
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigIssue {
    /// `JWT_SECRET` unset or shorter than 32 bytes outside development
    #[error("JWT_SECRET must be set to at least {} bytes", auth::MIN_SECRET_BYTES)]
    WeakJwtSecret,
    /// Token lifetime must be positive
    #[error("JWT_EXPIRATION_SECONDS must be positive")]
    NonPositiveTokenLifetime,
}

impl AppConfig {
    /// Load configuration from environment
    pub fn from_env() -> Self {
        let environment = Environment::from_env();
        let mut logging = LoggingConfig::for_environment(environment);
        if let Ok(level) = std::env::var("LOG_LEVEL") {
            logging.level = level;
        }

        Self {
            environment,
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
            cors: CorsConfig::from_env(),
            logging,
        }
    }

    /// Check the configuration for values that must not reach production
    ///
    /// In development a weak secret only produces a warning.
    pub fn validate(&self) -> Result<(), ConfigIssue> {
        if self.auth.jwt.expiration_seconds <= 0 {
            return Err(ConfigIssue::NonPositiveTokenLifetime);
        }
        if !self.auth.jwt.has_strong_secret() {
            if self.environment.is_development() {
                tracing::warn!("Using a weak JWT secret; set JWT_SECRET before deploying");
            } else {
                return Err(ConfigIssue::WeakJwtSecret);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid_in_development() {
        let config = AppConfig::default();
        assert!(config.environment.is_development());
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_weak_secret_rejected_in_production() {
        let config = AppConfig {
            environment: Environment::Production,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigIssue::WeakJwtSecret));
    }

    #[test]
    fn test_strong_secret_accepted_in_production() {
        let mut config = AppConfig {
            environment: Environment::Production,
            ..Default::default()
        };
        config.auth.jwt = JwtConfig::new("a-production-secret-of-sufficient-length");
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_non_positive_lifetime_rejected() {
        let mut config = AppConfig::default();
        config.auth.jwt.expiration_seconds = 0;
        assert_eq!(config.validate(), Err(ConfigIssue::NonPositiveTokenLifetime));
    }

    #[test]
    fn test_issue_messages_name_the_variable() {
        assert_eq!(
            ConfigIssue::WeakJwtSecret.to_string(),
            "JWT_SECRET must be set to at least 32 bytes"
        );
        assert_eq!(
            ConfigIssue::NonPositiveTokenLifetime.to_string(),
            "JWT_EXPIRATION_SECONDS must be positive"
        );
    }
}
