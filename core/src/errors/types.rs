//! Authentication and token error types
//!
//! Messages here are safe to show to end users; the HTTP status and error
//! code are assigned in the presentation layer.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Registration with an email that is already stored
    #[error("Email {email} is already registered")]
    EmailAlreadyRegistered { email: String },

    /// Unknown email or wrong password; the two cases are deliberately indistinguishable
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The token was valid but its subject no longer exists, or no identity was established
    #[error("Authentication required")]
    Unauthenticated,
}

/// Token-related errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// The string is not a parseable compact JWS with the expected claims
    #[error("Malformed token")]
    Malformed,

    /// Signature does not verify under the server secret
    #[error("Invalid token signature")]
    BadSignature,

    /// Signature is fine but `now >= exp`
    #[error("Token expired")]
    Expired,

    #[error("Token generation failed")]
    GenerationFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_credentials_message_has_no_detail() {
        assert_eq!(AuthError::InvalidCredentials.to_string(), "Invalid credentials");
    }

    #[test]
    fn test_conflict_message_names_email() {
        let error = AuthError::EmailAlreadyRegistered {
            email: "a@x.com".to_string(),
        };
        assert_eq!(error.to_string(), "Email a@x.com is already registered");
    }

    #[test]
    fn test_token_error_messages() {
        assert_eq!(TokenError::Expired.to_string(), "Token expired");
        assert_eq!(TokenError::BadSignature.to_string(), "Invalid token signature");
        assert_eq!(TokenError::Malformed.to_string(), "Malformed token");
    }
}
