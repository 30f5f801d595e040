//! Values returned by `Tracker` operations.

use phet_core::account::UserRecord;
use phet_core::budget::{BudgetStatus, Overrun};
use phet_core::ledger::{EntryView, ExpenseEntry, LedgerSummary};
use phet_shared::types::{Currency, Money};
use rust_decimal::Decimal;
use serde::Serialize;

/// The logged-in account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveUser {
    /// Session email.
    pub email: String,
    /// Stored record for that email.
    pub record: UserRecord,
}

/// Result of a successful `add_expense`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpenseOutcome {
    /// Category the entry was appended to.
    pub category: String,
    /// The stored entry.
    pub entry: ExpenseEntry,
    /// Total spend after the insertion.
    pub total: Decimal,
    /// Budget minus total after the insertion.
    pub remaining: Decimal,
    /// Set when the insertion took the total past the budget.
    pub overrun: Option<Overrun>,
}

/// Everything the dashboard shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    /// Display name.
    pub username: String,
    /// Account email.
    pub email: String,
    /// Current budget.
    pub budget: Decimal,
    /// Totals and per-category subtotals.
    pub summary: LedgerSummary,
    /// Spend against the budget.
    pub status: BudgetStatus,
    /// Entries in display order: categories in order, newest first within each.
    pub entries: Vec<EntryView>,
}

/// User-facing overrun notice, e.g. `You have gone over your budget by ₦1000.00`.
#[must_use]
pub fn overrun_message(overrun: &Overrun, currency: Currency) -> String {
    format!(
        "You have gone over your budget by {}",
        Money::new(overrun.amount, currency)
    )
}
