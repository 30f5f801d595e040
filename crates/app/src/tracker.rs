//! The tracker service.

use std::sync::Arc;

use phet_core::account::{
    AccountRules, SignupInput, UserRecord, credentials_match, normalize_email, validate_signup,
};
use phet_core::budget::{BudgetService, BudgetStatus};
use phet_core::clock::{Clock, SystemClock};
use phet_core::ledger::{EntryView, LedgerService};
use phet_shared::config::AppConfig;
use phet_shared::types::{Currency, Money};
use phet_shared::{AppError, AppResult};
use phet_store::{KeyValueStorage, Lookup, SessionRepository, UserRepository};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::views::{ActiveUser, Dashboard, ExpenseOutcome};

/// Accounts, the current session and the expense ledger over one storage.
#[derive(Clone)]
pub struct Tracker {
    users: UserRepository,
    sessions: SessionRepository,
    clock: Arc<dyn Clock>,
    rules: AccountRules,
    currency: Currency,
}

impl Tracker {
    /// Creates a tracker over `storage` using the system clock.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStorage>, config: &AppConfig) -> Self {
        Self::with_clock(storage, config, Arc::new(SystemClock))
    }

    /// Creates a tracker with an explicit time source.
    #[must_use]
    pub fn with_clock(
        storage: Arc<dyn KeyValueStorage>,
        config: &AppConfig,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users: UserRepository::new(storage.clone(), config.storage.users_key.clone()),
            sessions: SessionRepository::new(storage, config.storage.session_key.clone()),
            clock,
            rules: AccountRules::from(&config.accounts),
            currency: config.display.currency,
        }
    }

    /// Display currency.
    #[must_use]
    pub const fn currency(&self) -> Currency {
        self.currency
    }

    /// Wraps an amount in the display currency.
    #[must_use]
    pub const fn money(&self, amount: Decimal) -> Money {
        Money::new(amount, self.currency)
    }

    /// Creates an account and logs it in.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for the first failed signup rule,
    /// `AppError::DuplicateAccount` if the email is taken, or a storage error.
    pub fn signup(&self, input: &SignupInput) -> AppResult<ActiveUser> {
        let valid = validate_signup(input, &self.rules)?;

        if self.users.exists(&valid.email)? {
            info!(email = %valid.email, "Signup for existing account");
            return Err(AppError::DuplicateAccount(valid.email));
        }

        let (email, record) = valid.into_record();
        self.users.put(&email, record.clone())?;
        self.sessions.set_current(&email)?;

        info!(email = %email, username = %record.username, "Account created");
        Ok(ActiveUser { email, record })
    }

    /// Logs in with email and password.
    ///
    /// # Errors
    ///
    /// Returns `AppError::AuthFailure` for an unknown email or a wrong
    /// password, with the same message for both, or a storage error.
    pub fn login(&self, email: &str, password: &str) -> AppResult<ActiveUser> {
        let email = normalize_email(email);

        let record = match self.users.get(&email)? {
            Lookup::Found(record) => record,
            Lookup::NotFound => {
                warn!(email = %email, "Login attempt for non-existent account");
                return Err(AppError::AuthFailure);
            }
        };

        if !credentials_match(&record, password) {
            warn!(email = %email, "Failed login attempt - invalid password");
            return Err(AppError::AuthFailure);
        }

        self.sessions.set_current(&email)?;
        info!(email = %email, "User logged in");
        Ok(ActiveUser { email, record })
    }

    /// Clears the current session. Logging out with no session is a no-op.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the session cannot be cleared.
    pub fn logout(&self) -> AppResult<()> {
        let previous = self.sessions.current()?;
        self.sessions.clear_current()?;
        if let Some(email) = previous {
            info!(email = %email, "User logged out");
        }
        Ok(())
    }

    /// Resolves the current session to its account.
    ///
    /// A session pointing at a deleted account is cleared.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotLoggedIn` with no session,
    /// `AppError::StaleSession` if the account is gone, or a storage error.
    pub fn current_user(&self) -> AppResult<ActiveUser> {
        let email = self.sessions.current()?.ok_or(AppError::NotLoggedIn)?;

        match self.users.get(&email)? {
            Lookup::Found(record) => Ok(ActiveUser { email, record }),
            Lookup::NotFound => {
                warn!(email = %email, "Session points at a missing account, clearing it");
                self.sessions.clear_if_current(&email)?;
                Err(AppError::StaleSession(email))
            }
        }
    }

    /// Deletes the logged-in account and ends its session.
    ///
    /// Returns the deleted email.
    ///
    /// # Errors
    ///
    /// Returns a session error from `current_user` or a storage error.
    pub fn delete_account(&self) -> AppResult<String> {
        let ActiveUser { email, .. } = self.current_user()?;

        self.users.remove(&email)?;
        self.sessions.clear_if_current(&email)?;

        info!(email = %email, "Account deleted");
        Ok(email)
    }

    /// Sets the budget from user input and returns the resulting status.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if the budget is not a positive number,
    /// a session error, or a storage error.
    pub fn set_budget(&self, raw: &str) -> AppResult<BudgetStatus> {
        let budget = BudgetService::parse_budget(raw)?;
        let email = self.current_user()?.email;

        let status = self
            .users
            .update(&email, |record| -> AppResult<BudgetStatus> {
                record.budget = budget;
                Ok(BudgetStatus::evaluate(
                    budget,
                    LedgerService::total(&record.records),
                ))
            })?;

        info!(email = %email, budget = %budget, "Budget updated");
        Ok(status)
    }

    /// Adds an empty category and returns its trimmed name.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for a blank name,
    /// `AppError::DuplicateCategory` if it exists, a session error, or a
    /// storage error.
    pub fn add_category(&self, name: &str) -> AppResult<String> {
        let email = self.current_user()?.email;

        let name = self.users.update(&email, |record| -> AppResult<String> {
            Ok(LedgerService::add_category(&mut record.records, name)?)
        })?;

        info!(email = %email, category = %name, "Category added");
        Ok(name)
    }

    /// Parses `raw_amount`, appends an entry to `category` stamped with the
    /// current time, and reports the new totals.
    ///
    /// The overrun notice is advisory: the entry is stored either way.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for a bad amount,
    /// `AppError::UnknownCategory` for a missing category, a session error,
    /// or a storage error. Nothing is stored on error.
    pub fn add_expense(
        &self,
        category: &str,
        raw_amount: &str,
        note: Option<&str>,
    ) -> AppResult<ExpenseOutcome> {
        let amount = LedgerService::parse_amount(raw_amount)?;
        let email = self.current_user()?.email;
        let now = self.clock.now();

        let outcome = self
            .users
            .update(&email, |record: &mut UserRecord| -> AppResult<ExpenseOutcome> {
                let entry =
                    LedgerService::add_entry(&mut record.records, category, amount, note, now)?;
                let total = LedgerService::total(&record.records);
                Ok(ExpenseOutcome {
                    category: category.to_string(),
                    entry,
                    total,
                    remaining: record.budget.saturating_sub(total),
                    overrun: BudgetService::check_overrun(total, record.budget),
                })
            })?;

        info!(
            email = %email,
            category = %category,
            amount = %amount,
            total = %outcome.total,
            "Expense added"
        );
        if let Some(overrun) = &outcome.overrun {
            warn!(
                email = %email,
                budget = %overrun.budget,
                over_by = %overrun.amount,
                "Budget exceeded"
            );
        }
        Ok(outcome)
    }

    /// Totals, budget status and the entry list for the logged-in account.
    ///
    /// # Errors
    ///
    /// Returns a session error or a storage error.
    pub fn dashboard(&self) -> AppResult<Dashboard> {
        let ActiveUser { email, record } = self.current_user()?;
        debug!(email = %email, "Building dashboard");

        let summary = LedgerService::summary(&record.records, record.budget);
        let status = BudgetStatus::evaluate(record.budget, summary.total);
        let entries = LedgerService::display_entries(&record.records);

        Ok(Dashboard {
            username: record.username,
            email,
            budget: record.budget,
            summary,
            status,
            entries,
        })
    }

    /// Case-insensitive search over category names and notes.
    ///
    /// # Errors
    ///
    /// Returns a session error or a storage error.
    pub fn search(&self, query: &str) -> AppResult<Vec<EntryView>> {
        let ActiveUser { email, record } = self.current_user()?;
        debug!(email = %email, query = %query, "Searching entries");
        Ok(LedgerService::search(&record.records, query))
    }

    /// Category names of the logged-in account, in order.
    ///
    /// # Errors
    ///
    /// Returns a session error or a storage error.
    pub fn categories(&self) -> AppResult<Vec<String>> {
        let record = self.current_user()?.record;
        Ok(record.records.names().map(str::to_string).collect())
    }
}
