//! Property-based tests for ledger aggregation.

use chrono::{NaiveDate, NaiveDateTime};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::records::{DEFAULT_CATEGORIES, Records};
use super::service::LedgerService;

fn noon() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 19)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

/// Strictly positive amounts with two decimal places.
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// (category index, amount) insertions.
fn insertions_strategy(max_len: usize) -> impl Strategy<Value = Vec<(usize, Decimal)>> {
    prop::collection::vec((0..DEFAULT_CATEGORIES.len(), amount_strategy()), 0..=max_len)
}

/// Zero, negative, or unparseable raw amounts.
fn invalid_raw_amount() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("0".to_string()),
        Just("NaN".to_string()),
        Just(String::new()),
        (1i64..1_000_000i64).prop_map(|n| format!("-{}", Decimal::new(n, 2))),
        "[a-z]{1,8}",
    ]
}

fn apply(insertions: &[(usize, Decimal)]) -> Records {
    let mut records = Records::with_defaults();
    for (index, amount) in insertions {
        LedgerService::add_entry(&mut records, DEFAULT_CATEGORIES[*index], *amount, None, noon())
            .unwrap();
    }
    records
}

proptest! {
    /// Total equals the arithmetic sum of every inserted amount.
    #[test]
    fn prop_total_is_sum_of_inserted(insertions in insertions_strategy(40)) {
        let records = apply(&insertions);
        let expected: Decimal = insertions.iter().map(|(_, amount)| *amount).sum();

        prop_assert_eq!(LedgerService::total(&records), expected);
        prop_assert_eq!(LedgerService::entry_count(&records), insertions.len());
    }

    /// Insertion order across categories does not change the total.
    #[test]
    fn prop_total_independent_of_order(insertions in insertions_strategy(40)) {
        let mut reversed = insertions.clone();
        reversed.reverse();

        prop_assert_eq!(
            LedgerService::total(&apply(&insertions)),
            LedgerService::total(&apply(&reversed))
        );
    }

    /// Category subtotals add up to the total.
    #[test]
    fn prop_subtotals_sum_to_total(insertions in insertions_strategy(40)) {
        let records = apply(&insertions);
        let subtotals: Decimal = DEFAULT_CATEGORIES
            .iter()
            .map(|name| LedgerService::category_subtotal(&records, name))
            .sum();

        prop_assert_eq!(subtotals, LedgerService::total(&records));
    }

    /// remaining = budget - total, and may go negative.
    #[test]
    fn prop_remaining_is_budget_minus_total(
        insertions in insertions_strategy(20),
        budget in amount_strategy(),
    ) {
        let records = apply(&insertions);
        prop_assert_eq!(
            LedgerService::remaining(&records, budget),
            budget - LedgerService::total(&records)
        );
    }

    /// Rejected amounts never change the count or the total.
    #[test]
    fn prop_invalid_amount_is_not_committed(
        insertions in insertions_strategy(10),
        raw in invalid_raw_amount(),
    ) {
        let mut records = apply(&insertions);
        let total_before = LedgerService::total(&records);
        let count_before = LedgerService::entry_count(&records);

        let parsed = LedgerService::parse_amount(&raw);
        prop_assert!(parsed.is_err());

        if let Some(amount) = super::entry::parse_decimal(&raw) {
            prop_assert!(
                LedgerService::add_entry(&mut records, "food", amount, None, noon()).is_err()
            );
        }

        prop_assert_eq!(LedgerService::total(&records), total_before);
        prop_assert_eq!(LedgerService::entry_count(&records), count_before);
    }
}
