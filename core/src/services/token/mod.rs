//! Token service module for JWT management
//!
//! This module handles the stateless bearer tokens used by the API:
//! - HS256 token issuance for an authenticated subject
//! - Signature and expiry verification against an injectable clock

mod clock;
mod config;
mod service;

#[cfg(test)]
mod tests;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::TokenServiceConfig;
pub use service::TokenService;
