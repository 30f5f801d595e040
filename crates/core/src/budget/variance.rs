//! Budget utilization calculations.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Where spending stands relative to the budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetState {
    /// Spent less than the budget.
    UnderBudget,
    /// Spent exactly the budget.
    OnBudget,
    /// Spent more than the budget.
    OverBudget,
}

/// Budget vs spending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetStatus {
    /// Budget amount.
    pub budget: Decimal,
    /// Total spent.
    pub spent: Decimal,
    /// Budget minus spent.
    pub variance: Decimal,
    /// Spent as a percentage of the budget, two decimal places. Pinned at
    /// `Decimal::MAX` when the ratio is too large to represent.
    pub utilization_percent: Decimal,
    /// Classification of the variance.
    pub state: BudgetState,
}

impl BudgetStatus {
    /// Evaluates spending against a budget.
    ///
    /// Under budget is favorable, over budget is unfavorable. A zero budget
    /// reports zero utilization.
    #[must_use]
    pub fn evaluate(budget: Decimal, spent: Decimal) -> Self {
        let variance = budget.saturating_sub(spent);

        let utilization_percent = if budget.is_zero() {
            Decimal::ZERO
        } else {
            spent
                .checked_div(budget)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .map_or(Decimal::MAX, |percent| percent.round_dp(2))
        };

        let state = match variance.cmp(&Decimal::ZERO) {
            std::cmp::Ordering::Greater => BudgetState::UnderBudget,
            std::cmp::Ordering::Less => BudgetState::OverBudget,
            std::cmp::Ordering::Equal => BudgetState::OnBudget,
        };

        Self {
            budget,
            spent,
            variance,
            utilization_percent,
            state,
        }
    }

    /// Amount spent beyond the budget, if any.
    #[must_use]
    pub fn overrun(&self) -> Option<Decimal> {
        (self.state == BudgetState::OverBudget).then(|| -self.variance)
    }
}
