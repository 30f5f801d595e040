//! Signup rules and credential checks.

use phet_shared::config::AccountsConfig;

use super::error::AccountError;
use super::types::UserRecord;

/// Signup rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRules {
    /// Substring every email must contain.
    pub required_email_domain: String,
    /// Minimum username length in characters.
    pub min_username_chars: usize,
    /// Minimum password length in characters.
    pub min_password_chars: usize,
}

impl Default for AccountRules {
    fn default() -> Self {
        Self::from(&AccountsConfig::default())
    }
}

impl From<&AccountsConfig> for AccountRules {
    fn from(config: &AccountsConfig) -> Self {
        Self {
            required_email_domain: config.required_email_domain.clone(),
            min_username_chars: config.min_username_chars,
            min_password_chars: config.min_password_chars,
        }
    }
}

/// Raw signup form input.
#[derive(Debug, Clone)]
pub struct SignupInput {
    /// Email, unique account key.
    pub email: String,
    /// Display name.
    pub username: String,
    /// Password.
    pub password: String,
}

/// Signup input that passed every rule. Email and username are trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSignup {
    /// Trimmed email.
    pub email: String,
    /// Trimmed username.
    pub username: String,
    /// Password as typed.
    pub password: String,
}

impl ValidSignup {
    /// Builds the record stored for this signup.
    #[must_use]
    pub fn into_record(self) -> (String, UserRecord) {
        let record = UserRecord::new_account(self.username, self.password);
        (self.email, record)
    }
}

/// Trims an email the way every entry point does before using it as a key.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_string()
}

/// Validates signup input. Rules are checked in a fixed order and the first
/// failure is returned.
///
/// # Errors
///
/// Returns the first `AccountError` rule violation.
pub fn validate_signup(input: &SignupInput, rules: &AccountRules) -> Result<ValidSignup, AccountError> {
    let email = normalize_email(&input.email);
    let username = input.username.trim().to_string();
    let password = input.password.clone();

    if email.is_empty() || username.is_empty() || password.is_empty() {
        return Err(AccountError::MissingFields);
    }

    if !email.contains(rules.required_email_domain.as_str()) {
        return Err(AccountError::EmailDomain {
            domain: rules.required_email_domain.clone(),
        });
    }

    if username.chars().count() < rules.min_username_chars {
        return Err(AccountError::UsernameTooShort {
            min: rules.min_username_chars,
        });
    }

    if password.chars().count() < rules.min_password_chars {
        return Err(AccountError::PasswordTooShort {
            min: rules.min_password_chars,
        });
    }

    Ok(ValidSignup {
        email,
        username,
        password,
    })
}

/// Exact-match password check. Stored passwords are plain text.
#[must_use]
pub fn credentials_match(record: &UserRecord, password: &str) -> bool {
    record.password == password
}
