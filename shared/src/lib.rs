//! Shared utilities and common types for the notifier server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - The wire error response structure
//! - Validation and log-masking helpers

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, ConfigIssue, CorsConfig, DatabaseConfig, Environment, JwtConfig, LoggingConfig,
    ServerConfig,
};
pub use types::response::{error_codes, ErrorResponse};
pub use utils::validation;
