//! Service layer for the budget planner
//!
//! The service layer holds the business rules on top of the models:
//! category bookkeeping, the expense integrity check, and balance replay.

pub mod budget;

pub use budget::{Budget, DEFAULT_RECENT_TRANSACTIONS};
