//! User repository over the serialized user map.
//!
//! The whole map lives under one key. Every write re-serializes and replaces
//! the entire map, so concurrent writers resolve as last-write-wins.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use phet_core::account::UserRecord;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::storage::KeyValueStorage;

/// Email to user record.
pub type UserMap = BTreeMap<String, UserRecord>;

/// Result of looking up an email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// The account exists.
    Found(UserRecord),
    /// No account under this email.
    NotFound,
}

impl Lookup {
    /// Returns the record, if found.
    #[must_use]
    pub fn into_option(self) -> Option<UserRecord> {
        match self {
            Self::Found(record) => Some(record),
            Self::NotFound => None,
        }
    }

    /// Returns true if the account exists.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// User repository for whole-record reads and writes.
#[derive(Clone)]
pub struct UserRepository {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
}

impl UserRepository {
    /// Creates a user repository over `storage`, using `key` for the user map.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Loads the entire user map. A missing key is an empty map.
    ///
    /// # Errors
    ///
    /// Returns an error if the read fails or the stored map is corrupt.
    pub fn load_all(&self) -> StoreResult<UserMap> {
        match self.storage.get_item(&self.key)? {
            Some(raw) => {
                serde_json::from_str(&raw).map_err(|e| StoreError::corrupt(&self.key, e))
            }
            None => Ok(UserMap::new()),
        }
    }

    /// Replaces the entire user map.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or the write fails.
    pub fn save_all(&self, users: &UserMap) -> StoreResult<()> {
        let raw = serde_json::to_string(users).map_err(|e| StoreError::Encode {
            key: self.key.clone(),
            source: e,
        })?;
        self.storage.set_item(&self.key, &raw)?;
        debug!(users = users.len(), "Saved user map");
        Ok(())
    }

    /// Looks up an email.
    ///
    /// # Errors
    ///
    /// Returns an error if the user map cannot be loaded.
    pub fn get(&self, email: &str) -> StoreResult<Lookup> {
        Ok(self
            .load_all()?
            .remove(email)
            .map_or(Lookup::NotFound, Lookup::Found))
    }

    /// Returns the record for `email`, or a fresh default record if there is
    /// none. Nothing is written.
    ///
    /// # Errors
    ///
    /// Returns an error if the user map cannot be loaded.
    pub fn get_or_default(&self, email: &str) -> StoreResult<UserRecord> {
        Ok(self
            .get(email)?
            .into_option()
            .unwrap_or_else(UserRecord::new_default))
    }

    /// Returns true if an account exists for `email`.
    ///
    /// # Errors
    ///
    /// Returns an error if the user map cannot be loaded.
    pub fn exists(&self, email: &str) -> StoreResult<bool> {
        Ok(self.load_all()?.contains_key(email))
    }

    /// Stores `record` under `email`, replacing any existing record whole.
    ///
    /// # Errors
    ///
    /// Returns an error if the map cannot be loaded or saved.
    pub fn put(&self, email: &str, record: UserRecord) -> StoreResult<()> {
        let mut users = self.load_all()?;
        users.insert(email.to_string(), record);
        self.save_all(&users)
    }

    /// Deletes the record under `email`. Returns true if one existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the map cannot be loaded or saved.
    pub fn remove(&self, email: &str) -> StoreResult<bool> {
        let mut users = self.load_all()?;
        let existed = users.remove(email).is_some();
        if existed {
            self.save_all(&users)?;
        }
        Ok(existed)
    }

    /// Every stored email.
    ///
    /// # Errors
    ///
    /// Returns an error if the user map cannot be loaded.
    pub fn all_emails(&self) -> StoreResult<BTreeSet<String>> {
        Ok(self.load_all()?.into_keys().collect())
    }

    /// Read-modify-write of one record as a single unit.
    ///
    /// Loads the map, runs `f` on the record, and saves the map only if `f`
    /// succeeds. On error nothing is written.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::UserNotFound` (converted into `E`) if there is no
    /// record for `email`, any storage error, or the error returned by `f`.
    pub fn update<T, E, F>(&self, email: &str, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut UserRecord) -> Result<T, E>,
        E: From<StoreError>,
    {
        let mut users = self.load_all()?;
        let record = users
            .get_mut(email)
            .ok_or_else(|| StoreError::UserNotFound(email.to_string()))?;

        let value = f(record)?;
        self.save_all(&users)?;
        Ok(value)
    }
}
