//! Budget error types.

use phet_shared::AppError;
use thiserror::Error;

/// Budget-related errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BudgetError {
    /// Budget is not a number or is not strictly positive.
    #[error("Enter valid budget")]
    InvalidBudget,
}

impl From<BudgetError> for AppError {
    fn from(err: BudgetError) -> Self {
        Self::Validation(err.to_string())
    }
}
