//! Application layer for Phet.
//!
//! `Tracker` is the single entry point used by front ends. It resolves the
//! current session, then runs each mutation as one read-modify-write of the
//! user record.

mod tracker;
mod views;

pub use tracker::Tracker;
pub use views::{ActiveUser, Dashboard, ExpenseOutcome, overrun_message};
