//! Storage error types.

use phet_shared::AppError;
use thiserror::Error;

/// Result type alias using `StoreError`.
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Key contains characters the backend cannot store.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// Reading or writing the backing medium failed.
    #[error("storage I/O failed for key '{key}': {source}")]
    Io {
        /// Key being accessed.
        key: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Stored value could not be decoded.
    #[error("stored value under '{key}' is corrupt: {source}")]
    Corrupt {
        /// Key holding the corrupt value.
        key: String,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },

    /// Value could not be encoded.
    #[error("failed to encode value for '{key}': {source}")]
    Encode {
        /// Key being written.
        key: String,
        /// Encoder error.
        #[source]
        source: serde_json::Error,
    },

    /// No account exists for this email.
    #[error("no account for {0}")]
    UserNotFound(String),
}

impl StoreError {
    /// Create an I/O error.
    #[must_use]
    pub fn io(key: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            key: key.into(),
            source,
        }
    }

    /// Create a corrupt value error.
    #[must_use]
    pub fn corrupt(key: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Corrupt {
            key: key.into(),
            source,
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UserNotFound(email) => Self::NotFound(email),
            encode @ StoreError::Encode { .. } => Self::Internal(encode.to_string()),
            other => Self::Storage(other.to_string()),
        }
    }
}
