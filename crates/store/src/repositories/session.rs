//! Session repository: the current-session email string.

use std::sync::Arc;

use tracing::debug;

use crate::error::StoreResult;
use crate::storage::KeyValueStorage;

/// Reads and writes the current-session key.
///
/// Holds only the email. Whether that email still has an account is for the
/// caller to check.
#[derive(Clone)]
pub struct SessionRepository {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
}

impl SessionRepository {
    /// Creates a session repository over `storage`, using `key` for the email.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Marks `email` as logged in.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage write fails.
    pub fn set_current(&self, email: &str) -> StoreResult<()> {
        self.storage.set_item(&self.key, email)?;
        debug!(email, "Session set");
        Ok(())
    }

    /// Returns the logged-in email, if any. A blank stored value counts as none.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage read fails.
    pub fn current(&self) -> StoreResult<Option<String>> {
        Ok(self
            .storage
            .get_item(&self.key)?
            .filter(|email| !email.trim().is_empty()))
    }

    /// Logs out.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage write fails.
    pub fn clear_current(&self) -> StoreResult<()> {
        self.storage.remove_item(&self.key)?;
        debug!("Session cleared");
        Ok(())
    }

    /// Clears the session only if it points at `email`. Returns true if it did.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage read or write fails.
    pub fn clear_if_current(&self, email: &str) -> StoreResult<bool> {
        if self.current()?.as_deref() == Some(email) {
            self.clear_current()?;
            return Ok(true);
        }
        Ok(false)
    }
}
