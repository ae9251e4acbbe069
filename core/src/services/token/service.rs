//! Main token service implementation

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::{Claims, IssuedToken};
use crate::errors::TokenError;

use super::clock::{Clock, SystemClock};
use super::config::TokenServiceConfig;

/// Issues and verifies HS256 bearer tokens
///
/// Verification is a pure computation over the token string, the secret and
/// the clock, so one instance is shared by every request handler.
pub struct TokenService {
    ttl: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    /// Creates a token service reading the system clock
    pub fn new(config: TokenServiceConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a token service with an explicit time source
    pub fn with_clock(config: TokenServiceConfig, clock: Arc<dyn Clock>) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        // Expiry is checked against `clock` after the signature, with no leeway
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["sub", "iat", "exp"]);

        Self {
            ttl: Duration::seconds(config.ttl_seconds),
            encoding_key,
            decoding_key,
            validation,
            clock,
        }
    }

    /// Token lifetime
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issues a signed token for `subject`, valid from now until now + TTL
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedToken)` - The compact token with its validity window
    /// * `Err(TokenError::GenerationFailed)` - Signing failed
    pub fn issue(&self, subject: &str) -> Result<IssuedToken, TokenError> {
        let now = self.clock.now();
        let claims = Claims::new(subject, now, self.ttl);

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign token");
            TokenError::GenerationFailed
        })?;

        Ok(IssuedToken {
            token,
            subject: claims.sub,
            issued_at: now,
            expires_at: now + self.ttl,
        })
    }

    /// Verifies a token and returns its claims
    ///
    /// The signature is checked before the expiry, so a forged token is
    /// reported as `BadSignature` even when its claims are also stale.
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Signature valid and `now < exp`
    /// * `Err(TokenError::Malformed)` - Not a parseable HS256 token with the required claims
    /// * `Err(TokenError::BadSignature)` - Signature does not match the secret
    /// * `Err(TokenError::Expired)` - Signature valid but the token is past its expiry
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature => TokenError::BadSignature,
                _ => TokenError::Malformed,
            }
        })?;

        if data.claims.is_expired_at(self.clock.now()) {
            return Err(TokenError::Expired);
        }

        Ok(data.claims)
    }

    /// Verifies a token and returns only its subject
    pub fn verify_subject(&self, token: &str) -> Result<String, TokenError> {
        self.verify(token).map(|claims| claims.sub)
    }
}
