//! Budget Planner - track income and expenses against category limits
//!
//! This library provides an in-memory budget ledger: income and expense
//! transactions, spending categories with limits, a replayed running
//! balance, and a monthly summary report. Nothing is persisted; a budget
//! lives for the length of one session.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Money, transactions, and categories
//! - `services`: The budget ledger and its integrity rules
//! - `reports`: The monthly report and its output formats
//! - `config`: Settings file and path management
//! - `cli`: The interactive menu
//! - `logging`: Tracing subscriber setup
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```
//! use budget_planner::models::{Money, Transaction};
//! use budget_planner::services::Budget;
//!
//! let mut budget = Budget::new(Money::from_dollars_cents(100, 0));
//! budget.add_category("Food", Money::from_dollars_cents(50, 0))?;
//! budget.add_transaction(Transaction::expense(Money::from_dollars_cents(60, 0), "Food", "")?)?;
//!
//! assert_eq!(budget.calculate_balance(), Money::from_dollars_cents(40, 0));
//! assert!(budget.category("Food").unwrap().is_over_budget());
//! # Ok::<(), budget_planner::PlannerError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;

pub use error::{PlannerError, PlannerResult};
