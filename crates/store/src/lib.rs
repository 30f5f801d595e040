//! Persistence layer with key-value backends and repositories.
//!
//! This crate provides:
//! - The `KeyValueStorage` interface and its memory and file backends
//! - `UserRepository` over the serialized user map
//! - `SessionRepository` over the current-session email

pub mod error;
pub mod repositories;
pub mod storage;

pub use error::{StoreError, StoreResult};
pub use repositories::{Lookup, SessionRepository, UserMap, UserRepository};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
