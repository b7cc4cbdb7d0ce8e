//! Input acceptability rules for the login form.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{domain::Credentials, error::ValidationError};

pub const MIN_SECRET_LEN: usize = 6;

static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9+._%\-]{1,256}@[a-zA-Z0-9][a-zA-Z0-9\-]{0,64}(\.[a-zA-Z0-9][a-zA-Z0-9\-]{0,25})+$",
    )
    .expect("email pattern is valid")
});

pub fn is_valid_email(identifier: &str) -> bool {
    EMAIL_SHAPE.is_match(identifier)
}

pub fn is_valid_secret(secret: &str) -> bool {
    secret.chars().count() >= MIN_SECRET_LEN
}

/// Checks both fields; a malformed email is reported ahead of a short secret.
pub fn validate_credentials(credentials: &Credentials) -> Result<(), ValidationError> {
    if !is_valid_email(&credentials.identifier) {
        return Err(ValidationError::InvalidEmail);
    }
    if !is_valid_secret(&credentials.secret) {
        return Err(ValidationError::secret_too_short());
    }
    Ok(())
}
