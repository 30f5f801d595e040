//! Ledger error types.

use phet_shared::AppError;
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// Amount is not a number or is not strictly positive.
    #[error("Enter a valid amount.")]
    InvalidAmount,

    /// Category name is blank.
    #[error("Category name cannot be empty.")]
    EmptyCategoryName,

    /// Category already exists.
    #[error("Category exists: {0}")]
    DuplicateCategory(String),

    /// Category does not exist.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::DuplicateCategory(name) => Self::DuplicateCategory(name),
            LedgerError::UnknownCategory(name) => Self::UnknownCategory(name),
            LedgerError::InvalidAmount | LedgerError::EmptyCategoryName => {
                Self::Validation(err.to_string())
            }
        }
    }
}
