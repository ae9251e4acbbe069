//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default token lifetime (24 hours)
pub const DEFAULT_TOKEN_TTL_SECONDS: i64 = 86_400;

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (student email)
    pub sub: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// JWT ID, keeps two tokens minted in the same second distinct
    pub jti: String,
}

impl Claims {
    /// Creates claims for `subject` issued at `now` and living for `ttl`
    pub fn new(subject: impl Into<String>, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            sub: subject.into(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Expired once `now` reaches `exp`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// The subject this token was issued for
    pub fn subject(&self) -> &str {
        &self.sub
    }
}

/// A freshly minted bearer token together with its validity window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Compact, URL-safe JWS string
    pub token: String,
    pub subject: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}
