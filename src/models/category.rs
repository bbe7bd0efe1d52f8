//! Category model
//!
//! A category tracks how much has been spent against a spending limit for
//! the current period. Going over the limit is allowed and reported.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;
use crate::error::PlannerError;

/// Marker shown for categories that are over their limit
pub const OVER_BUDGET_MARKER: &str = "OVER BUDGET!";

/// Marker shown for categories within their limit
pub const WITHIN_BUDGET_MARKER: &str = "✓";

/// A spending category with a limit and a running total
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CategoryRecord")]
pub struct Category {
    name: String,
    limit: Money,
    spent: Money,
}

impl Category {
    /// Create a new category with nothing spent
    ///
    /// A negative limit is clamped to zero.
    pub fn new(name: impl Into<String>, limit: Money) -> Self {
        Self {
            name: name.into(),
            limit: if limit.is_negative() { Money::zero() } else { limit },
            spent: Money::zero(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn limit(&self) -> Money {
        self.limit
    }

    pub fn spent(&self) -> Money {
        self.spent
    }

    /// Record spending against this category
    ///
    /// Non-positive amounts are ignored. The total saturates instead of
    /// overflowing.
    pub fn add_expense(&mut self, amount: Money) {
        if amount.is_positive() {
            self.spent = self.spent.saturating_add(amount);
        }
    }

    /// Amount left before the limit is reached (negative when over budget)
    pub fn remaining(&self) -> Money {
        self.limit - self.spent
    }

    /// Spending exactly at the limit is not over budget
    pub fn is_over_budget(&self) -> bool {
        self.spent > self.limit
    }

    /// Percentage of the limit used; 0 when the limit is zero
    pub fn usage_percentage(&self) -> f64 {
        if self.limit.is_zero() {
            return 0.0;
        }
        self.spent.cents() as f64 / self.limit.cents() as f64 * 100.0
    }

    /// Zero the spent total to start a new period
    pub fn reset_spent(&mut self) {
        self.spent = Money::zero();
    }

    /// Status marker for display
    pub fn status(&self) -> &'static str {
        if self.is_over_budget() {
            OVER_BUDGET_MARKER
        } else {
            WITHIN_BUDGET_MARKER
        }
    }
}

/// Serialized form of a category, checked before it becomes a [`Category`]
#[derive(Deserialize)]
struct CategoryRecord {
    name: String,
    limit: Money,
    #[serde(default)]
    spent: Money,
}

impl TryFrom<CategoryRecord> for Category {
    type Error = PlannerError;

    fn try_from(record: CategoryRecord) -> Result<Self, Self::Error> {
        let name = record.name.trim();
        if name.is_empty() {
            return Err(PlannerError::Validation(
                "Category name cannot be empty".into(),
            ));
        }
        if record.spent.is_negative() {
            return Err(PlannerError::Validation(format!(
                "Category spending cannot be negative, got {}",
                record.spent
            )));
        }

        let mut category = Category::new(name, record.limit);
        category.spent = record.spent;
        Ok(category)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} / {} ({:.1}%) {}",
            self.name,
            self.spent,
            self.limit,
            self.usage_percentage(),
            self.status()
        )
    }
}
