//! Authentication service module
//!
//! This module provides the credential side of the system:
//! - Student registration with hashed passwords
//! - Email and password login
//! - Bearer token authentication for incoming requests

mod password;
mod service;

#[cfg(test)]
mod tests;

pub use password::{BcryptPasswordHasher, PasswordHasher, DEFAULT_BCRYPT_COST};
pub use service::{AuthService, Registration};
