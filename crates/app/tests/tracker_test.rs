//! Integration tests for the tracker service.

use std::sync::Arc;

use chrono::NaiveDate;
use phet_app::{Tracker, overrun_message};
use phet_core::account::{SignupInput, UserRecord};
use phet_core::budget::BudgetState;
use phet_core::clock::FixedClock;
use phet_shared::AppError;
use phet_shared::config::AppConfig;
use phet_shared::types::Currency;
use phet_store::{KeyValueStorage, MemoryStorage, SessionRepository, UserRepository};
use rstest::{fixture, rstest};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const EMAIL: &str = "ada@gmail.com";
const PASSWORD: &str = "secret1";

struct Harness {
    storage: Arc<MemoryStorage>,
    tracker: Tracker,
}

impl Harness {
    fn users(&self) -> UserRepository {
        UserRepository::new(self.storage.clone(), "phet_users")
    }

    fn sessions(&self) -> SessionRepository {
        SessionRepository::new(self.storage.clone(), "phet_current")
    }
}

fn signup_input(email: &str, username: &str, password: &str) -> SignupInput {
    SignupInput {
        email: email.to_string(),
        username: username.to_string(),
        password: password.to_string(),
    }
}

#[fixture]
fn harness() -> Harness {
    let storage = Arc::new(MemoryStorage::new());
    let noon = NaiveDate::from_ymd_opt(2026, 10, 19)
        .unwrap()
        .and_hms_opt(12, 30, 0)
        .unwrap();
    let tracker = Tracker::with_clock(
        storage.clone(),
        &AppConfig::default(),
        Arc::new(FixedClock(noon)),
    );
    Harness { storage, tracker }
}

#[fixture]
fn logged_in(harness: Harness) -> Harness {
    harness
        .tracker
        .signup(&signup_input(EMAIL, "adaeze_o", PASSWORD))
        .unwrap();
    harness
}

// ============================================================================
// Accounts and sessions
// ============================================================================

#[rstest]
fn test_signup_logs_in(harness: Harness) {
    let user = harness
        .tracker
        .signup(&signup_input(" ada@gmail.com ", " adaeze_o ", PASSWORD))
        .unwrap();

    assert_eq!(user.email, EMAIL);
    assert_eq!(user.record, UserRecord::new_account("adaeze_o", PASSWORD));
    assert_eq!(harness.sessions().current().unwrap().as_deref(), Some(EMAIL));
    assert_eq!(harness.tracker.current_user().unwrap(), user);
}

#[rstest]
#[case(signup_input("", "adaeze_o", PASSWORD), "All fields are required.")]
#[case(signup_input("ada@yahoo.com", "adaeze_o", PASSWORD), "Email must include @gmail.com for demo.")]
#[case(signup_input(EMAIL, "short", PASSWORD), "Username must be at least 8 characters.")]
#[case(signup_input(EMAIL, "adaeze_o", "12345"), "Password must be at least 6 characters.")]
fn test_signup_rejections(harness: Harness, #[case] input: SignupInput, #[case] message: &str) {
    let err = harness.tracker.signup(&input).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
    assert_eq!(err.to_string(), message);

    assert!(harness.users().all_emails().unwrap().is_empty());
    assert_eq!(harness.sessions().current().unwrap(), None);
}

#[rstest]
fn test_duplicate_signup(logged_in: Harness) {
    let err = logged_in
        .tracker
        .signup(&signup_input(EMAIL, "someone_else", "another1"))
        .unwrap_err();

    assert!(matches!(err, AppError::DuplicateAccount(ref e) if e == EMAIL));
    assert_eq!(err.to_string(), "Account already exists.");
    assert_eq!(
        logged_in.users().get_or_default(EMAIL).unwrap().username,
        "adaeze_o"
    );
}

#[rstest]
fn test_login_failures_share_message(logged_in: Harness) {
    logged_in.tracker.logout().unwrap();

    let wrong_password = logged_in.tracker.login(EMAIL, "not-it").unwrap_err();
    let unknown_email = logged_in
        .tracker
        .login("nobody@gmail.com", PASSWORD)
        .unwrap_err();

    assert!(matches!(wrong_password, AppError::AuthFailure));
    assert!(matches!(unknown_email, AppError::AuthFailure));
    assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    assert_eq!(wrong_password.to_string(), "No record found or wrong password.");
    assert_eq!(logged_in.sessions().current().unwrap(), None);
}

#[rstest]
fn test_login_logout(logged_in: Harness) {
    logged_in.tracker.logout().unwrap();
    assert!(matches!(
        logged_in.tracker.current_user(),
        Err(AppError::NotLoggedIn)
    ));
    // Logging out twice is harmless.
    logged_in.tracker.logout().unwrap();

    let user = logged_in.tracker.login(" ada@gmail.com", PASSWORD).unwrap();
    assert_eq!(user.email, EMAIL);
    assert_eq!(logged_in.tracker.current_user().unwrap().email, EMAIL);
}

#[rstest]
fn test_operations_require_login(harness: Harness) {
    assert!(matches!(harness.tracker.dashboard(), Err(AppError::NotLoggedIn)));
    assert!(matches!(
        harness.tracker.add_expense("food", "10", None),
        Err(AppError::NotLoggedIn)
    ));
    assert!(matches!(
        harness.tracker.set_budget("10"),
        Err(AppError::NotLoggedIn)
    ));
    assert!(matches!(
        harness.tracker.delete_account(),
        Err(AppError::NotLoggedIn)
    ));
}

#[rstest]
fn test_delete_account_clears_session(logged_in: Harness) {
    logged_in.tracker.add_expense("food", "4000", None).unwrap();

    let deleted = logged_in.tracker.delete_account().unwrap();
    assert_eq!(deleted, EMAIL);

    assert_eq!(logged_in.sessions().current().unwrap(), None);
    assert!(!logged_in.users().exists(EMAIL).unwrap());
    assert_eq!(
        logged_in.users().get_or_default(EMAIL).unwrap(),
        UserRecord::new_default()
    );
    assert!(matches!(
        logged_in.tracker.login(EMAIL, PASSWORD),
        Err(AppError::AuthFailure)
    ));
}

#[rstest]
fn test_stale_session_is_cleared(logged_in: Harness) {
    // Another process removed the account behind our back.
    logged_in.users().remove(EMAIL).unwrap();

    let err = logged_in.tracker.current_user().unwrap_err();
    assert!(matches!(err, AppError::StaleSession(ref e) if e == EMAIL));
    assert_eq!(logged_in.sessions().current().unwrap(), None);
    assert!(matches!(
        logged_in.tracker.current_user(),
        Err(AppError::NotLoggedIn)
    ));
}

// ============================================================================
// Ledger and budget
// ============================================================================

#[rstest]
fn test_budget_overrun_scenario(logged_in: Harness) {
    let first = logged_in.tracker.add_expense("food", "4000", None).unwrap();
    assert_eq!(first.total, dec!(4000));
    assert_eq!(first.remaining, dec!(6000));
    assert_eq!(first.overrun, None);

    let second = logged_in
        .tracker
        .add_expense("food", "7000", Some("party"))
        .unwrap();
    assert_eq!(second.total, dec!(11000));
    assert_eq!(second.remaining, dec!(-1000));
    let overrun = second.overrun.unwrap();
    assert_eq!(overrun.amount, dec!(1000));
    assert_eq!(
        overrun_message(&overrun, logged_in.tracker.currency()),
        "You have gone over your budget by ₦1000.00"
    );

    // The entry was stored despite the overrun.
    let dashboard = logged_in.tracker.dashboard().unwrap();
    assert_eq!(dashboard.summary.total, dec!(11000));
    assert_eq!(dashboard.summary.entry_count, 2);
    assert_eq!(dashboard.status.state, BudgetState::OverBudget);
}

#[rstest]
fn test_expense_entry_details(logged_in: Harness) {
    let outcome = logged_in
        .tracker
        .add_expense("transport", " 250.5 ", Some("  bus fare "))
        .unwrap();

    assert_eq!(outcome.category, "transport");
    assert_eq!(outcome.entry.amount, dec!(250.5));
    assert_eq!(outcome.entry.note.as_deref(), Some("bus fare"));
    assert_eq!(outcome.entry.time_label(), "2026-10-19 12:30:00");
}

#[rstest]
#[case("0")]
#[case("-5")]
#[case("abc")]
#[case("")]
fn test_invalid_amount_changes_nothing(logged_in: Harness, #[case] raw: &str) {
    let before = logged_in.storage.get_item("phet_users").unwrap();

    let err = logged_in.tracker.add_expense("food", raw, None).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    assert_eq!(logged_in.storage.get_item("phet_users").unwrap(), before);
    assert_eq!(logged_in.tracker.dashboard().unwrap().summary.entry_count, 0);
}

#[rstest]
fn test_unknown_category(logged_in: Harness) {
    let err = logged_in
        .tracker
        .add_expense("rent", "100", None)
        .unwrap_err();
    assert!(matches!(err, AppError::UnknownCategory(ref c) if c == "rent"));
    assert_eq!(logged_in.tracker.dashboard().unwrap().summary.total, dec!(0));
}

#[rstest]
fn test_duplicate_category_leaves_ledger_unchanged(logged_in: Harness) {
    logged_in.tracker.add_expense("food", "300", None).unwrap();
    let before = logged_in.tracker.dashboard().unwrap();

    let err = logged_in.tracker.add_category("food").unwrap_err();
    assert!(matches!(err, AppError::DuplicateCategory(ref c) if c == "food"));

    assert_eq!(logged_in.tracker.dashboard().unwrap(), before);
    assert_eq!(
        logged_in.tracker.categories().unwrap(),
        vec!["food", "transport", "gadget"]
    );
}

#[rstest]
fn test_new_category_is_appended(logged_in: Harness) {
    let name = logged_in.tracker.add_category("  books ").unwrap();
    assert_eq!(name, "books");

    logged_in.tracker.add_expense("books", "1500", None).unwrap();

    let dashboard = logged_in.tracker.dashboard().unwrap();
    let names: Vec<_> = dashboard
        .summary
        .categories
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert_eq!(names, vec!["food", "transport", "gadget", "books"]);
    assert_eq!(dashboard.summary.categories[3].subtotal, dec!(1500));
}

#[rstest]
fn test_set_budget(logged_in: Harness) {
    logged_in.tracker.add_expense("gadget", "900", None).unwrap();

    let status = logged_in.tracker.set_budget("1000").unwrap();
    assert_eq!(status.budget, dec!(1000));
    assert_eq!(status.variance, dec!(100));
    assert_eq!(status.state, BudgetState::UnderBudget);

    let err = logged_in.tracker.set_budget("0").unwrap_err();
    assert_eq!(err.to_string(), "Enter valid budget");
    assert_eq!(logged_in.tracker.dashboard().unwrap().budget, dec!(1000));

    let outcome = logged_in.tracker.add_expense("gadget", "200", None).unwrap();
    assert_eq!(outcome.overrun.map(|o| o.amount), Some(dec!(100)));
}

#[rstest]
fn test_expense_that_would_overflow_total_is_rejected(logged_in: Harness) {
    let half = "50000000000000000000000000000";
    logged_in.tracker.add_expense("food", half, None).unwrap();

    let err = logged_in.tracker.add_expense("food", half, None).unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let dashboard = logged_in.tracker.dashboard().unwrap();
    assert_eq!(dashboard.summary.entry_count, 1);
    assert_eq!(dashboard.summary.total, dec!(50000000000000000000000000000));
}

#[rstest]
fn test_tiny_budget_with_huge_spend_keeps_dashboard_usable(logged_in: Harness) {
    logged_in.tracker.set_budget("0.0000000001").unwrap();
    let outcome = logged_in
        .tracker
        .add_expense("food", "100000000000000000000", None)
        .unwrap();
    assert!(outcome.overrun.is_some());

    let dashboard = logged_in.tracker.dashboard().unwrap();
    assert_eq!(dashboard.status.state, BudgetState::OverBudget);
    assert_eq!(dashboard.status.utilization_percent, Decimal::MAX);

    let status = logged_in.tracker.set_budget("0.0000000002").unwrap();
    assert_eq!(status.utilization_percent, Decimal::MAX);
}

#[rstest]
fn test_dashboard_and_search(logged_in: Harness) {
    logged_in
        .tracker
        .add_expense("food", "1200", Some("Lunch at Mama Put"))
        .unwrap();
    logged_in.tracker.add_expense("food", "800", None).unwrap();
    logged_in
        .tracker
        .add_expense("transport", "500", Some("okada"))
        .unwrap();

    let dashboard = logged_in.tracker.dashboard().unwrap();
    assert_eq!(dashboard.username, "adaeze_o");
    assert_eq!(dashboard.email, EMAIL);
    assert_eq!(dashboard.summary.remaining, dec!(7500));
    let amounts: Vec<_> = dashboard.entries.iter().map(|v| v.entry.amount).collect();
    assert_eq!(amounts, vec![dec!(800), dec!(1200), dec!(500)]);

    let hits = logged_in.tracker.search("LUNCH").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].entry.amount, dec!(1200));

    assert_eq!(logged_in.tracker.search("food").unwrap().len(), 2);
    assert_eq!(logged_in.tracker.search("  ").unwrap().len(), 3);
    assert!(logged_in.tracker.search("rent").unwrap().is_empty());
}

#[rstest]
fn test_accounts_are_isolated(logged_in: Harness) {
    logged_in.tracker.add_expense("food", "4000", None).unwrap();

    logged_in
        .tracker
        .signup(&signup_input("bola@gmail.com", "bolatito", "hunter22"))
        .unwrap();
    assert_eq!(logged_in.tracker.dashboard().unwrap().summary.total, dec!(0));

    logged_in.tracker.login(EMAIL, PASSWORD).unwrap();
    assert_eq!(
        logged_in.tracker.dashboard().unwrap().summary.total,
        dec!(4000)
    );
}

#[test]
fn test_money_uses_configured_currency() {
    let mut config = AppConfig::default();
    config.display.currency = Currency::Usd;
    let tracker = Tracker::new(Arc::new(MemoryStorage::new()), &config);
    assert_eq!(tracker.money(dec!(12.349)).to_string(), "$12.34");
}
