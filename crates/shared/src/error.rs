//! Application-wide error types.
//!
//! The `Display` text of every variant is the message shown to the user.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Input rejected before any mutation.
    #[error("{0}")]
    Validation(String),

    /// Category name already present in the ledger.
    #[error("Category exists: {0}")]
    DuplicateCategory(String),

    /// Category name not present in the ledger.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// Signup with an email that already has an account.
    #[error("Account already exists.")]
    DuplicateAccount(String),

    /// Wrong credentials. Unknown email and wrong password share this variant.
    #[error("No record found or wrong password.")]
    AuthFailure,

    /// The session points at an account that no longer exists.
    #[error("Session expired: the account no longer exists. Please login.")]
    StaleSession(String),

    /// No session is active.
    #[error("Please login")]
    NotLoggedIn,

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Persistence failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the stable error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::DuplicateCategory(_) => "DUPLICATE_CATEGORY",
            Self::UnknownCategory(_) => "UNKNOWN_CATEGORY",
            Self::DuplicateAccount(_) => "DUPLICATE_ACCOUNT",
            Self::AuthFailure => "AUTH_FAILURE",
            Self::StaleSession(_) => "STALE_SESSION",
            Self::NotLoggedIn => "NOT_LOGGED_IN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true if the error was caused by user input rather than the system.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        !matches!(self, Self::Storage(_) | Self::Internal(_))
    }
}
