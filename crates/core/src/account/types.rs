//! User record types.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::budget::DEFAULT_BUDGET;
use crate::ledger::Records;
use crate::ledger::entry::parse_decimal;

/// Everything stored for one account, keyed by email in the user store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Display name.
    #[serde(default)]
    pub username: String,
    /// Plain-text password, compared by exact match.
    #[serde(default)]
    pub password: String,
    /// Spending budget, always positive.
    #[serde(
        default = "default_budget",
        serialize_with = "rust_decimal::serde::str::serialize",
        deserialize_with = "lenient_budget"
    )]
    pub budget: Decimal,
    /// Category name to expense entries.
    #[serde(default)]
    pub records: Records,
}

fn default_budget() -> Decimal {
    DEFAULT_BUDGET
}

/// Reads a stored budget, falling back to the default when it is missing,
/// not numeric, or not positive.
fn lenient_budget<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
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
        .filter(|budget| *budget > Decimal::ZERO)
        .unwrap_or(DEFAULT_BUDGET))
}

impl Default for UserRecord {
    fn default() -> Self {
        Self::new_default()
    }
}

impl UserRecord {
    /// The record a never-seen email resolves to: empty credentials, default
    /// budget, and the default categories with no entries.
    #[must_use]
    pub fn new_default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            budget: DEFAULT_BUDGET,
            records: Records::with_defaults(),
        }
    }

    /// A fresh account record for signup.
    #[must_use]
    pub fn new_account(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            ..Self::new_default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_default() {
        let record = UserRecord::new_default();
        assert!(record.username.is_empty());
        assert!(record.password.is_empty());
        assert_eq!(record.budget, dec!(10000));
        assert_eq!(
            record.records.names().collect::<Vec<_>>(),
            vec!["food", "transport", "gadget"]
        );
    }

    #[test]
    fn test_new_account() {
        let record = UserRecord::new_account("adaeze_o", "secret1");
        assert_eq!(record.username, "adaeze_o");
        assert_eq!(record.password, "secret1");
        assert_eq!(record.budget, DEFAULT_BUDGET);
        assert_eq!(record.records.len(), 3);
    }

    #[test]
    fn test_serialized_shape() {
        let record = UserRecord::new_account("adaeze_o", "secret1");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "username": "adaeze_o",
                "password": "secret1",
                "budget": "10000",
                "records": {"food": [], "transport": [], "gadget": []}
            })
        );
    }

    #[test]
    fn test_lenient_budget() {
        let cases = [
            (r#"{"budget": 2500}"#, dec!(2500)),
            (r#"{"budget": "750.5"}"#, dec!(750.5)),
            (r#"{"budget": 0}"#, dec!(10000)),
            (r#"{"budget": -3}"#, dec!(10000)),
            (r#"{"budget": "lots"}"#, dec!(10000)),
            (r#"{"budget": null}"#, dec!(10000)),
            (r"{}", dec!(10000)),
        ];
        for (raw, expected) in cases {
            let record: UserRecord = serde_json::from_str(raw).unwrap();
            assert_eq!(record.budget, expected, "input: {raw}");
        }
    }

    #[test]
    fn test_missing_records_gets_defaults() {
        let record: UserRecord =
            serde_json::from_str(r#"{"username": "u", "password": "p", "budget": 10}"#).unwrap();
        assert_eq!(record.records, Records::with_defaults());
    }
}
