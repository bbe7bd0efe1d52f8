//! Core data models for the budget planner
//!
//! This module contains the value types of the budgeting domain: money
//! amounts, transactions, and spending categories.

pub mod category;
pub mod money;
pub mod transaction;

pub use category::Category;
pub use money::{Money, MoneyParseError};
pub use transaction::{Transaction, TransactionKind};
