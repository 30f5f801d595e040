//! Account error types.

use phet_shared::AppError;
use thiserror::Error;

/// Signup rule violations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    /// Email, username, or password is empty.
    #[error("All fields are required.")]
    MissingFields,

    /// Email does not contain the required domain.
    #[error("Email must include {domain} for demo.")]
    EmailDomain {
        /// The domain every email must contain.
        domain: String,
    },

    /// Username is too short.
    #[error("Username must be at least {min} characters.")]
    UsernameTooShort {
        /// Minimum length in characters.
        min: usize,
    },

    /// Password is too short.
    #[error("Password must be at least {min} characters.")]
    PasswordTooShort {
        /// Minimum length in characters.
        min: usize,
    },
}

impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        Self::Validation(err.to_string())
    }
}
