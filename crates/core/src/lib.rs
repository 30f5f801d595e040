//! Core business logic for Phet.
//!
//! This crate contains pure business logic with ZERO storage dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `account` - User record model and signup/login rules
//! - `ledger` - Categorized expense entries and aggregation
//! - `budget` - Budget validation and overrun detection
//! - `clock` - Time source for entry timestamps

pub mod account;
pub mod budget;
pub mod clock;
pub mod ledger;
