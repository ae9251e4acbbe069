//! Field rules shared by the services
//!
//! The HTTP layer validates request bodies too; these checks keep the
//! services correct when called directly.

use notifier_shared::validation::{is_valid_email, not_blank, within_length, MIN_PASSWORD_LENGTH};

use crate::errors::{DomainError, DomainResult};

pub const MAX_NAME_LENGTH: usize = 50;
pub const MAX_TITLE_LENGTH: usize = 100;
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

pub(crate) fn require_name(field: &str, value: &str) -> DomainResult<()> {
    if !not_blank(value) {
        return Err(DomainError::validation(format!("{} is required", field)));
    }
    if !within_length(Some(value), MAX_NAME_LENGTH) {
        return Err(DomainError::validation(format!(
            "{} must be at most {} characters",
            field, MAX_NAME_LENGTH
        )));
    }
    Ok(())
}

pub(crate) fn require_email(email: &str) -> DomainResult<()> {
    if !is_valid_email(email) {
        return Err(DomainError::validation("Email must be a valid address"));
    }
    Ok(())
}

pub(crate) fn require_password(raw_password: &str) -> DomainResult<()> {
    if raw_password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(DomainError::validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

pub(crate) fn require_title(title: &str) -> DomainResult<()> {
    if !not_blank(title) {
        return Err(DomainError::validation("Title is required"));
    }
    if !within_length(Some(title), MAX_TITLE_LENGTH) {
        return Err(DomainError::validation(format!(
            "Title must be at most {} characters",
            MAX_TITLE_LENGTH
        )));
    }
    Ok(())
}

pub(crate) fn check_description(description: Option<&str>) -> DomainResult<()> {
    if !within_length(description, MAX_DESCRIPTION_LENGTH) {
        return Err(DomainError::validation(format!(
            "Description must be at most {} characters",
            MAX_DESCRIPTION_LENGTH
        )));
    }
    Ok(())
}
