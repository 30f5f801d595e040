//! Budget validation, overrun detection, and utilization.

pub mod error;
pub mod service;
pub mod variance;


pub use error::BudgetError;
pub use service::{BudgetService, DEFAULT_BUDGET, Overrun};
pub use variance::{BudgetState, BudgetStatus};
