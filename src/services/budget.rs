//! Budget ledger
//!
//! Owns the spending categories and the transaction history, enforces that
//! expenses only land in existing categories, and derives balances and
//! totals by replaying the history.

use tracing::{debug, info, warn};

use crate::error::{PlannerError, PlannerResult};
use crate::models::{Category, Money, Transaction};
use crate::reports::MonthlyReport;

/// Default number of transactions shown in the monthly report
pub const DEFAULT_RECENT_TRANSACTIONS: usize = 10;

/// In-memory budget: categories plus an append-only transaction history
#[derive(Debug, Clone, Default)]
pub struct Budget {
    initial_balance: Money,
    transactions: Vec<Transaction>,
    /// Kept in creation order; names are unique
    categories: Vec<Category>,
}

impl Budget {
    /// Create an empty budget starting from `initial_balance`
    pub fn new(initial_balance: Money) -> Self {
        Self {
            initial_balance,
            transactions: Vec::new(),
            categories: Vec::new(),
        }
    }

    pub fn initial_balance(&self) -> Money {
        self.initial_balance
    }

    // === Category Operations ===

    /// Create a new category
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank name and a duplicate error if
    /// a category with this name already exists. The existing category is
    /// left untouched.
    pub fn add_category(&mut self, name: &str, limit: Money) -> PlannerResult<&Category> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PlannerError::Validation(
                "Category name cannot be empty".into(),
            ));
        }

        if self.category_exists(name) {
            warn!(category = name, "rejected duplicate category");
            return Err(PlannerError::duplicate_category(name));
        }

        let category = Category::new(name, limit);
        info!(
            category = name,
            limit = %category.limit(),
            "created category"
        );
        self.categories.push(category);

        let index = self.categories.len() - 1;
        Ok(&self.categories[index])
    }

    pub fn category_exists(&self, name: &str) -> bool {
        self.category(name).is_some()
    }

    /// Look up a category by name, ignoring surrounding whitespace
    pub fn category(&self, name: &str) -> Option<&Category> {
        let name = name.trim();
        self.categories.iter().find(|c| c.name() == name)
    }

    fn category_mut(&mut self, name: &str) -> Option<&mut Category> {
        let name = name.trim();
        self.categories.iter_mut().find(|c| c.name() == name)
    }

    /// All categories in creation order
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Category names in creation order
    pub fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name()).collect()
    }

    /// Zero one category's spending to start a new period
    ///
    /// # Errors
    ///
    /// Returns a not found error if no category has this name.
    pub fn reset_spent(&mut self, name: &str) -> PlannerResult<()> {
        let category = self
            .category_mut(name)
            .ok_or_else(|| PlannerError::category_not_found(name))?;
        category.reset_spent();
        info!(category = name, "reset category spending");
        Ok(())
    }

    /// Zero spending for every category
    pub fn reset_all_spent(&mut self) {
        for category in &mut self.categories {
            category.reset_spent();
        }
        info!(count = self.categories.len(), "reset spending for all categories");
    }

    // === Transaction Operations ===

    /// Record a transaction
    ///
    /// Expenses are charged to their category before being appended. An
    /// expense whose category does not exist is rejected and nothing
    /// changes.
    ///
    /// # Errors
    ///
    /// Returns a not found error for an expense with an unknown category,
    /// and a validation error if the amount would overflow the balance or
    /// the income and expense totals.
    pub fn add_transaction(&mut self, transaction: Transaction) -> PlannerResult<&Transaction> {
        if let Some(name) = transaction.category() {
            if !self.category_exists(name) {
                warn!(
                    category = name,
                    amount = %transaction.amount(),
                    "rejected expense for unknown category"
                );
                return Err(PlannerError::category_not_found(name));
            }
        }
        self.check_overflow(&transaction)?;

        if let Some(name) = transaction.category() {
            if let Some(category) = self.category_mut(name) {
                category.add_expense(transaction.amount());
            }
        }

        info!(transaction = %transaction, "recorded transaction");
        self.transactions.push(transaction);

        let index = self.transactions.len() - 1;
        Ok(&self.transactions[index])
    }

    /// Every running balance and total stays representable once
    /// `transaction` is appended
    fn check_overflow(&self, transaction: &Transaction) -> PlannerResult<()> {
        let amount = transaction.amount();
        let total = if transaction.is_income() {
            self.total_income()
        } else {
            self.total_expenses()
        };

        let fits = transaction.checked_apply(self.calculate_balance()).is_some()
            && total.checked_add(amount).is_some();
        if !fits {
            warn!(amount = %amount, "rejected transaction that overflows the ledger");
            return Err(PlannerError::Validation(format!(
                "Amount {} is too large for this budget",
                amount
            )));
        }
        Ok(())
    }

    /// Full history in insertion order
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The last `count` transactions, oldest first
    pub fn recent_transactions(&self, count: usize) -> &[Transaction] {
        let start = self.transactions.len().saturating_sub(count);
        &self.transactions[start..]
    }

    // === Aggregates ===

    /// Replay the history over the initial balance
    pub fn calculate_balance(&self) -> Money {
        let balance = self
            .transactions
            .iter()
            .fold(self.initial_balance, |balance, txn| txn.apply(balance));
        debug!(
            transactions = self.transactions.len(),
            balance = %balance,
            "replayed balance"
        );
        balance
    }

    pub fn total_income(&self) -> Money {
        self.transactions
            .iter()
            .filter(|t| t.is_income())
            .map(|t| t.amount())
            .sum()
    }

    pub fn total_expenses(&self) -> Money {
        self.transactions
            .iter()
            .filter(|t| t.is_expense())
            .map(|t| t.amount())
            .sum()
    }

    /// Build the monthly summary showing the last `recent` transactions
    pub fn monthly_report(&self, recent: usize) -> MonthlyReport {
        MonthlyReport::generate(self, recent)
    }
}
