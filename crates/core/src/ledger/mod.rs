//! Expense ledger.
//!
//! This module implements the per-user expense ledger:
//! - Expense entries with lenient decoding of stored amounts
//! - Ordered category map
//! - Category and entry mutation
//! - Aggregation (total, remaining, subtotals, entry count)
//! - Display ordering and search

pub mod entry;
pub mod error;
pub mod records;
pub mod service;

#[cfg(test)]
mod service_props;

pub use entry::ExpenseEntry;
pub use error::LedgerError;
pub use records::{Category, DEFAULT_CATEGORIES, Records};
pub use service::{CategorySummary, EntryView, LedgerService, LedgerSummary};
