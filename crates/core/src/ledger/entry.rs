//! Expense entry domain types.

use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// A single recorded expense.
///
/// Entries are immutable once appended to a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseEntry {
    /// Amount spent. Positive when created; reads as zero if the stored value is unusable.
    #[serde(
        default,
        serialize_with = "rust_decimal::serde::str::serialize",
        deserialize_with = "lenient_amount"
    )]
    pub amount: Decimal,
    /// Local time the entry was recorded, second precision.
    #[serde(with = "entry_time")]
    pub time: NaiveDateTime,
    /// Optional free-text note.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "non_empty_note"
    )]
    pub note: Option<String>,
}

impl ExpenseEntry {
    /// Creates an entry, normalizing a blank note to `None`.
    #[must_use]
    pub fn new(amount: Decimal, time: NaiveDateTime, note: Option<&str>) -> Self {
        Self {
            amount,
            time,
            note: normalize_note(note),
        }
    }

    /// Returns the time formatted the way it is stored.
    #[must_use]
    pub fn time_label(&self) -> String {
        self.time.format(entry_time::FORMAT).to_string()
    }
}

fn normalize_note(note: Option<&str>) -> Option<String> {
    note.map(str::trim)
        .filter(|n| !n.is_empty())
        .map(ToString::to_string)
}

/// Reads an amount written by any version of the store.
///
/// Numbers and numeric strings are taken as-is. Missing, null, non-numeric
/// and negative values read as zero so aggregation never fails.
fn lenient_amount<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    let parsed = match raw {
        Some(serde_json::Value::Number(n)) => parse_decimal(&n.to_string()),
        Some(serde_json::Value::String(s)) => parse_decimal(s.trim()),
        _ => None,
    };

    Ok(parsed
        .filter(|amount| !amount.is_sign_negative())
        .unwrap_or(Decimal::ZERO))
}

/// Parses a plain or scientific decimal literal.
pub(crate) fn parse_decimal(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

fn non_empty_note<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let note = Option::<String>::deserialize(deserializer)?;
    Ok(normalize_note(note.as_deref()))
}

/// `YYYY-MM-DD HH:MM:SS` timestamps.
pub(crate) mod entry_time {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(crate) const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub(crate) fn serialize<S>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}
