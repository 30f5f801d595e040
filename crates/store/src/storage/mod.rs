//! Key-value storage backends.
//!
//! A backend holds string values under string keys, the same shape as browser
//! local storage. Every `set_item` replaces the whole value atomically, so a
//! reader sees either the previous value or the new one.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::{StoreError, StoreResult};

/// Storage interface used by the repositories.
pub trait KeyValueStorage: Send + Sync {
    /// Returns the value under `key`, if any.
    fn get_item(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replaces the value under `key`.
    fn set_item(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Removes `key`. Removing a missing key succeeds.
    fn remove_item(&self, key: &str) -> StoreResult<()>;
}

/// Checks that a key is non-empty, made of ASCII alphanumerics, `_`, `-` or
/// `.`, and does not start with `.`.
pub(crate) fn validate_key(key: &str) -> StoreResult<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));

    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}
