//! Budget service for validation and overrun detection.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::BudgetError;
use crate::ledger::entry::parse_decimal;

/// Budget assigned to new accounts and to records whose stored budget is unusable.
pub const DEFAULT_BUDGET: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// Spending has passed the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overrun {
    /// The budget that was exceeded.
    pub budget: Decimal,
    /// Total spend at the time of the check.
    pub total: Decimal,
    /// `total - budget`, always positive.
    pub amount: Decimal,
}

/// Budget service for business logic.
pub struct BudgetService;

impl BudgetService {
    /// Parses a user-typed budget.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::InvalidBudget` if the input is not a number or
    /// is not strictly positive.
    pub fn parse_budget(raw: &str) -> Result<Decimal, BudgetError> {
        let budget = parse_decimal(raw.trim()).ok_or(BudgetError::InvalidBudget)?;
        Self::validate_budget(budget)?;
        Ok(budget)
    }

    /// Checks that a budget may be stored.
    ///
    /// # Errors
    ///
    /// Returns `BudgetError::InvalidBudget` if the budget is zero or negative.
    pub fn validate_budget(budget: Decimal) -> Result<(), BudgetError> {
        if budget <= Decimal::ZERO {
            return Err(BudgetError::InvalidBudget);
        }
        Ok(())
    }

    /// Returns the overrun if `total` is strictly greater than `budget`.
    ///
    /// Advisory only: callers run this after a successful insertion.
    #[must_use]
    pub fn check_overrun(total: Decimal, budget: Decimal) -> Option<Overrun> {
        (total > budget).then(|| Overrun {
            budget,
            total,
            amount: total.saturating_sub(budget),
        })
    }
}
