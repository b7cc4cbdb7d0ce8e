use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::MIN_SECRET_LEN;

/// Rejected login input. The display text is what the login form shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Password must be at least {min} characters.")]
    SecretTooShort { min: usize },
}

impl ValidationError {
    pub fn secret_too_short() -> Self {
        Self::SecretTooShort {
            min: MIN_SECRET_LEN,
        }
    }
}

/// Well-formed credentials that were not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthenticationError {
    #[error("Invalid email or password. Try 'test@app.com' / 'password'.")]
    InvalidCredentials,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Home,
    Finance,
}

impl Screen {
    pub fn name(self) -> &'static str {
        match self {
            Screen::Home => "home",
            Screen::Finance => "finance",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to load {} data: {reason}", .screen.name())]
pub struct DataLoadError {
    pub screen: Screen,
    pub reason: String,
}

impl DataLoadError {
    pub fn new(screen: Screen, reason: impl Into<String>) -> Self {
        Self {
            screen,
            reason: reason.into(),
        }
    }
}

/// Read-model invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("{field} total must not be negative (got {value})")]
    NegativeTotal { field: &'static str, value: Decimal },
    #[error("date range starts {start} after it ends {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },
}

/// Any failure the shell can report to the person driving it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShellError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Authentication(#[from] AuthenticationError),
    #[error(transparent)]
    DataLoad(#[from] DataLoadError),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_match_login_form_copy() {
        assert_eq!(
            ValidationError::InvalidEmail.to_string(),
            "Please enter a valid email address."
        );
        assert_eq!(
            ValidationError::secret_too_short().to_string(),
            "Password must be at least 6 characters."
        );
    }

    #[test]
    fn data_load_error_names_the_screen() {
        let err = DataLoadError::new(Screen::Finance, "backend unavailable");
        assert_eq!(
            err.to_string(),
            "failed to load finance data: backend unavailable"
        );
        let wrapped: ShellError = err.clone().into();
        assert_eq!(wrapped, ShellError::DataLoad(err));
        assert_eq!(
            wrapped.to_string(),
            "failed to load finance data: backend unavailable"
        );
    }
}
