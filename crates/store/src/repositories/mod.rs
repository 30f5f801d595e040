//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface over the two persisted blobs,
//! hiding the key-value encoding from the rest of the application.

pub mod session;
pub mod user;

pub use session::SessionRepository;
pub use user::{Lookup, UserMap, UserRepository};
