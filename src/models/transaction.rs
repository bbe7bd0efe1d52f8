//! Transaction model
//!
//! A transaction is an immutable record of money moving in or out. Income
//! raises the balance, an expense lowers it and is charged to a category
//! referenced by name.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;
use crate::error::{PlannerError, PlannerResult};

/// Date format used when no explicit date is given
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// The variant of a transaction and its variant-specific data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in
    Income,
    /// Money going out, charged against a category
    Expense {
        /// Name of the category this expense counts against
        category: String,
    },
}

impl TransactionKind {
    /// Apply an amount of this kind to a balance
    ///
    /// Panics on overflow in debug builds; budgets only hold transactions
    /// that passed [`checked_apply`](Self::checked_apply).
    pub fn apply(&self, amount: Money, balance: Money) -> Money {
        match self {
            Self::Income => balance + amount,
            Self::Expense { .. } => balance - amount,
        }
    }

    /// Apply an amount of this kind to a balance, or `None` on overflow
    pub fn checked_apply(&self, amount: Money, balance: Money) -> Option<Money> {
        match self {
            Self::Income => balance.checked_add(amount),
            Self::Expense { .. } => balance.checked_sub(amount),
        }
    }

    /// Descriptive label: "INCOME" or "EXPENSE (<category>)"
    pub fn label(&self) -> String {
        match self {
            Self::Income => "INCOME".to_string(),
            Self::Expense { category } => format!("EXPENSE ({})", category),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TransactionRecord")]
pub struct Transaction {
    amount: Money,
    date: String,
    #[serde(default)]
    note: String,
    #[serde(flatten)]
    kind: TransactionKind,
}

impl Transaction {
    /// Create an income transaction dated today
    ///
    /// # Errors
    ///
    /// Returns a validation error if `amount` is not positive.
    pub fn income(amount: Money, note: impl Into<String>) -> PlannerResult<Self> {
        Self::build(amount, note.into(), TransactionKind::Income)
    }

    /// Create an expense transaction dated today
    ///
    /// The category name is trimmed and only has to be non-empty here;
    /// whether it exists is checked when the expense is added to a budget.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `amount` is not positive or the
    /// category name is blank.
    pub fn expense(
        amount: Money,
        category: impl Into<String>,
        note: impl Into<String>,
    ) -> PlannerResult<Self> {
        let category = category.into().trim().to_string();
        if category.is_empty() {
            return Err(PlannerError::Validation(
                "Expense category cannot be empty".into(),
            ));
        }
        Self::build(amount, note.into(), TransactionKind::Expense { category })
    }

    fn build(amount: Money, note: String, kind: TransactionKind) -> PlannerResult<Self> {
        if !amount.is_positive() {
            return Err(PlannerError::Validation(format!(
                "Amount must be positive, got {}",
                amount
            )));
        }

        Ok(Self {
            amount,
            date: today(DEFAULT_DATE_FORMAT),
            note,
            kind,
        })
    }

    /// Replace the default date with an explicit one
    ///
    /// A blank date keeps the default.
    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        let date = date.into();
        if !date.trim().is_empty() {
            self.date = date;
        }
        self
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn kind(&self) -> &TransactionKind {
        &self.kind
    }

    /// The referenced category name, for expenses
    pub fn category(&self) -> Option<&str> {
        match &self.kind {
            TransactionKind::Expense { category } => Some(category.as_str()),
            TransactionKind::Income => None,
        }
    }

    pub fn is_income(&self) -> bool {
        matches!(self.kind, TransactionKind::Income)
    }

    pub fn is_expense(&self) -> bool {
        matches!(self.kind, TransactionKind::Expense { .. })
    }

    /// Return the balance after this transaction is applied to `balance`
    pub fn apply(&self, balance: Money) -> Money {
        self.kind.apply(self.amount, balance)
    }

    pub fn checked_apply(&self, balance: Money) -> Option<Money> {
        self.kind.checked_apply(self.amount, balance)
    }

    pub fn type_label(&self) -> String {
        self.kind.label()
    }
}

/// Serialized form of a transaction, rebuilt through the constructors
#[derive(Deserialize)]
struct TransactionRecord {
    amount: Money,
    #[serde(default)]
    date: String,
    #[serde(default)]
    note: String,
    #[serde(flatten)]
    kind: TransactionKind,
}

impl TryFrom<TransactionRecord> for Transaction {
    type Error = PlannerError;

    fn try_from(record: TransactionRecord) -> PlannerResult<Self> {
        let txn = match record.kind {
            TransactionKind::Income => Self::income(record.amount, record.note)?,
            TransactionKind::Expense { category } => {
                Self::expense(record.amount, category, record.note)?
            }
        };
        Ok(txn.with_date(record.date))
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {} - {}",
            self.date,
            self.type_label(),
            self.amount,
            self.note
        )
    }
}

/// Today's local date rendered with a strftime format
pub fn today(format: &str) -> String {
    Local::now().format(format).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dollars(d: i64) -> Money {
        Money::from_dollars_cents(d, 0)
    }

    #[test]
    fn test_non_positive_amounts_rejected() {
        for cents in [0, -1, -5000] {
            let err = Transaction::income(Money::from_cents(cents), "").unwrap_err();
            assert!(err.is_validation());

            let err = Transaction::expense(Money::from_cents(cents), "Food", "").unwrap_err();
            assert!(err.is_validation());
        }
    }

    #[test]
    fn test_positive_amount_kept_exactly() {
        let txn = Transaction::income(Money::from_cents(1), "").unwrap();
        assert_eq!(txn.amount(), Money::from_cents(1));

        let txn = Transaction::expense(Money::from_cents(123456), "Rent", "").unwrap();
        assert_eq!(txn.amount(), Money::from_cents(123456));
    }

    #[test]
    fn test_expense_requires_category() {
        let err = Transaction::expense(dollars(5), "  ", "coffee").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_apply() {
        let income = Transaction::income(dollars(25), "").unwrap();
        let expense = Transaction::expense(dollars(40), "Food", "").unwrap();

        assert_eq!(income.apply(dollars(100)), dollars(125));
        assert_eq!(expense.apply(dollars(100)), dollars(60));
        assert_eq!(expense.apply(Money::zero()), dollars(-40));
    }

    #[test]
    fn test_checked_apply() {
        let income = Transaction::income(dollars(1), "").unwrap();
        let expense = Transaction::expense(dollars(1), "Food", "").unwrap();

        assert_eq!(income.checked_apply(dollars(2)), Some(dollars(3)));
        assert_eq!(expense.checked_apply(dollars(2)), Some(dollars(1)));
        assert_eq!(income.checked_apply(Money::from_cents(i64::MAX)), None);
        assert_eq!(expense.checked_apply(Money::from_cents(i64::MIN)), None);
    }

    #[test]
    fn test_expense_category_trimmed() {
        let txn = Transaction::expense(dollars(5), "  Food ", "").unwrap();
        assert_eq!(txn.category(), Some("Food"));
        assert_eq!(txn.type_label(), "EXPENSE (Food)");
    }

    #[test]
    fn test_type_label() {
        let income = Transaction::income(dollars(1), "").unwrap();
        let expense = Transaction::expense(dollars(1), "Food", "").unwrap();

        assert_eq!(income.type_label(), "INCOME");
        assert_eq!(expense.type_label(), "EXPENSE (Food)");
        assert!(income.is_income());
        assert!(expense.is_expense());
        assert_eq!(income.category(), None);
        assert_eq!(expense.category(), Some("Food"));
    }

    #[test]
    fn test_display() {
        let txn = Transaction::expense(Money::from_cents(1250), "Food", "groceries")
            .unwrap()
            .with_date("2025-01-15");
        assert_eq!(
            txn.to_string(),
            "[2025-01-15] EXPENSE (Food): $12.50 - groceries"
        );

        let txn = Transaction::income(dollars(1000), "")
            .unwrap()
            .with_date("2025-01-01");
        assert_eq!(txn.to_string(), "[2025-01-01] INCOME: $1000.00 - ");
    }

    #[test]
    fn test_default_date_is_today() {
        let txn = Transaction::income(dollars(1), "").unwrap();
        assert_eq!(txn.date().len(), 10);
        assert_eq!(txn.date(), today(DEFAULT_DATE_FORMAT));

        let txn = txn.with_date("");
        assert_eq!(txn.date(), today(DEFAULT_DATE_FORMAT));
    }

    #[test]
    fn test_serialization_shape() {
        let txn = Transaction::expense(dollars(3), "Food", "")
            .unwrap()
            .with_date("2025-02-01");
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["type"], "expense");
        assert_eq!(json["category"], "Food");
        assert_eq!(json["amount"], 300);

        let back: Transaction = serde_json::from_value(json).unwrap();
        assert_eq!(back, txn);
    }

    #[test]
    fn test_deserialize_applies_invariants() {
        let negative = r#"{"amount":-500,"date":"2025-01-01","type":"income"}"#;
        assert!(serde_json::from_str::<Transaction>(negative).is_err());

        let zero = r#"{"amount":0,"date":"2025-01-01","type":"income"}"#;
        assert!(serde_json::from_str::<Transaction>(zero).is_err());

        let blank = r#"{"amount":500,"date":"2025-01-01","type":"expense","category":" "}"#;
        assert!(serde_json::from_str::<Transaction>(blank).is_err());

        let txn: Transaction =
            serde_json::from_str(r#"{"amount":500,"type":"expense","category":"Food"}"#).unwrap();
        assert_eq!(txn.category(), Some("Food"));
        assert_eq!(txn.date(), today(DEFAULT_DATE_FORMAT));
    }
}
