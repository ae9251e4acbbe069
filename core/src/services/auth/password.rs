//! Password hashing

use crate::errors::DomainError;

/// Default bcrypt work factor
pub const DEFAULT_BCRYPT_COST: u32 = bcrypt::DEFAULT_COST;

/// Salted, adaptive one-way password hashing
pub trait PasswordHasher: Send + Sync {
    /// Hash a raw password with a fresh salt
    fn hash(&self, raw_password: &str) -> Result<String, DomainError>;

    /// Check a raw password against a stored hash
    ///
    /// A stored value that is not a valid hash never matches.
    fn verify(&self, raw_password: &str, password_hash: &str) -> bool;
}

/// bcrypt-backed hasher
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_BCRYPT_COST)
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, raw_password: &str) -> Result<String, DomainError> {
        bcrypt::hash(raw_password, self.cost).map_err(|e| {
            tracing::error!(error = %e, cost = self.cost, "Password hashing failed");
            DomainError::Internal {
                message: "Password hashing failed".to_string(),
            }
        })
    }

    fn verify(&self, raw_password: &str, password_hash: &str) -> bool {
        match bcrypt::verify(raw_password, password_hash) {
            Ok(matches) => matches,
            Err(e) => {
                tracing::error!(error = %e, "Stored password hash could not be parsed");
                false
            }
        }
    }
}
