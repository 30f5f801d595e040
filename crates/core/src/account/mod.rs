//! Accounts: the stored user record and signup/login rules.
//!
//! Passwords are stored and compared in plain text.

mod error;
mod types;
mod validation;

pub use error::AccountError;
pub use types::UserRecord;
pub use validation::{
    AccountRules, SignupInput, ValidSignup, credentials_match, normalize_email, validate_signup,
};
