//! Common validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum length of a student email
pub const MAX_EMAIL_LENGTH: usize = 100;

/// Minimum length of a raw password at registration
pub const MIN_PASSWORD_LENGTH: usize = 6;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*$")
        .expect("email regex is valid")
});

/// Check if a string looks like an email address
pub fn is_valid_email(email: &str) -> bool {
    email.len() <= MAX_EMAIL_LENGTH && EMAIL_REGEX.is_match(email)
}

/// Check if a string is not blank
pub fn not_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Check if an optional string stays within `max` characters
pub fn within_length(value: Option<&str>, max: usize) -> bool {
    value.map_or(true, |v| v.chars().count() <= max)
}

/// Mask an email for log output: `alice@example.com` -> `a***@example.com`
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first = local.chars().next().map(String::from).unwrap_or_default();
            format!("{}***@{}", first, domain)
        }
        None => "***".to_string(),
    }
}
