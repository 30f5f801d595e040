//! Ledger service: category and entry mutation plus aggregation.
//!
//! Aggregates are recomputed from the entries on every call. There is no
//! cached running total to keep in sync. Sums saturate at `Decimal::MAX`
//! instead of overflowing, so aggregation never fails on stored data.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::entry::{ExpenseEntry, parse_decimal};
use super::error::LedgerError;
use super::records::Records;

/// Per-category totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    /// Category name.
    pub name: String,
    /// Number of entries in the category.
    pub entry_count: usize,
    /// Sum of the category's amounts.
    pub subtotal: Decimal,
}

/// Ledger totals against a budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSummary {
    /// Sum of every entry.
    pub total: Decimal,
    /// Number of entries across all categories.
    pub entry_count: usize,
    /// Budget minus total. Negative when over budget.
    pub remaining: Decimal,
    /// One row per category, in category order.
    pub categories: Vec<CategorySummary>,
}

/// An entry together with the category it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryView {
    /// Owning category.
    pub category: String,
    /// The entry itself.
    pub entry: ExpenseEntry,
}

/// Ledger service for business logic.
pub struct LedgerService;

impl LedgerService {
    /// Parses a user-typed amount.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidAmount` if the input is not a number or
    /// is not strictly positive.
    pub fn parse_amount(raw: &str) -> Result<Decimal, LedgerError> {
        let amount = parse_decimal(raw.trim()).ok_or(LedgerError::InvalidAmount)?;
        Self::validate_amount(amount)?;
        Ok(amount)
    }

    /// Checks that an amount may be committed.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidAmount` if the amount is zero or negative.
    pub fn validate_amount(amount: Decimal) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount);
        }
        Ok(())
    }

    /// Adds an empty category.
    ///
    /// The name is trimmed before use.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::EmptyCategoryName` for a blank name and
    /// `LedgerError::DuplicateCategory` if the category already exists.
    pub fn add_category(records: &mut Records, name: &str) -> Result<String, LedgerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::EmptyCategoryName);
        }
        if !records.insert_empty(name) {
            return Err(LedgerError::DuplicateCategory(name.to_string()));
        }
        Ok(name.to_string())
    }

    /// Appends an entry to a category.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::InvalidAmount` if the amount is not positive or
    /// would push the total past `Decimal::MAX`, then
    /// `LedgerError::UnknownCategory` if the category does not exist.
    /// Nothing is appended on error.
    pub fn add_entry(
        records: &mut Records,
        category: &str,
        amount: Decimal,
        note: Option<&str>,
        now: NaiveDateTime,
    ) -> Result<ExpenseEntry, LedgerError> {
        Self::validate_amount(amount)?;
        Self::total(records)
            .checked_add(amount)
            .ok_or(LedgerError::InvalidAmount)?;

        let entries = records
            .entries_mut(category)
            .ok_or_else(|| LedgerError::UnknownCategory(category.to_string()))?;

        let entry = ExpenseEntry::new(amount, now, note);
        entries.push(entry.clone());
        Ok(entry)
    }

    /// Sum of every amount in every category.
    #[must_use]
    pub fn total(records: &Records) -> Decimal {
        records.iter().fold(Decimal::ZERO, |acc, category| {
            acc.saturating_add(sum_entries(&category.entries))
        })
    }

    /// Budget minus total spend.
    #[must_use]
    pub fn remaining(records: &Records, budget: Decimal) -> Decimal {
        budget.saturating_sub(Self::total(records))
    }

    /// Sum of one category's amounts. Zero for an unknown category.
    #[must_use]
    pub fn category_subtotal(records: &Records, category: &str) -> Decimal {
        records
            .entries(category)
            .map_or(Decimal::ZERO, sum_entries)
    }

    /// Number of entries across all categories.
    #[must_use]
    pub fn entry_count(records: &Records) -> usize {
        records.iter().map(|c| c.entries.len()).sum()
    }

    /// Computes totals and per-category rows.
    #[must_use]
    pub fn summary(records: &Records, budget: Decimal) -> LedgerSummary {
        let total = Self::total(records);
        let categories = records
            .iter()
            .map(|category| CategorySummary {
                name: category.name.clone(),
                entry_count: category.entries.len(),
                subtotal: sum_entries(&category.entries),
            })
            .collect();

        LedgerSummary {
            total,
            entry_count: Self::entry_count(records),
            remaining: budget.saturating_sub(total),
            categories,
        }
    }

    /// Lists entries for display: categories in order, newest entry first
    /// within each category.
    #[must_use]
    pub fn display_entries(records: &Records) -> Vec<EntryView> {
        records
            .iter()
            .flat_map(|category| {
                category.entries.iter().rev().map(|entry| EntryView {
                    category: category.name.clone(),
                    entry: entry.clone(),
                })
            })
            .collect()
    }

    /// Finds entries whose category or note contains the query, ignoring case.
    ///
    /// A blank query matches every entry. Results are in display order.
    #[must_use]
    pub fn search(records: &Records, query: &str) -> Vec<EntryView> {
        let needle = query.trim().to_lowercase();
        let mut views = Self::display_entries(records);
        if needle.is_empty() {
            return views;
        }

        views.retain(|view| {
            view.category.to_lowercase().contains(&needle)
                || view
                    .entry
                    .note
                    .as_deref()
                    .is_some_and(|note| note.to_lowercase().contains(&needle))
        });
        views
    }
}

fn sum_entries(entries: &[ExpenseEntry]) -> Decimal {
    entries
        .iter()
        .fold(Decimal::ZERO, |acc, entry| acc.saturating_add(entry.amount))
}
