//! Result of a successful registration or login.

use chrono::Duration;

use crate::domain::entities::{IssuedToken, Student};

/// A freshly issued bearer token together with the student it identifies
///
/// The presentation layer turns this into `{token, student}`; the student's
/// password hash is dropped at that point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthResponse {
    pub token: IssuedToken,
    pub student: Student,
}

impl AuthResponse {
    pub fn new(token: IssuedToken, student: Student) -> Self {
        Self { token, student }
    }

    /// Remaining lifetime of the token at issuance
    pub fn expires_in(&self) -> Duration {
        self.token.expires_at - self.token.issued_at
    }
}
