//! Monthly Budget Report
//!
//! A read-only snapshot of a budget: balance summary, every category's
//! usage, and the most recent transactions.

use serde::Serialize;

use super::ReportFormat;
use crate::error::{PlannerError, PlannerResult};
use crate::models::{Category, Money, Transaction};
use crate::services::Budget;

const RULE_WIDTH: usize = 60;

/// Balance figures at the top of the report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceSummary {
    pub initial_balance: Money,
    pub total_income: Money,
    pub total_expenses: Money,
    pub current_balance: Money,
}

/// Monthly budget report
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyReport {
    /// Balance summary
    pub balance: BalanceSummary,
    /// Every category, in creation order
    pub categories: Vec<Category>,
    /// Number of transactions in the whole history
    pub transaction_count: usize,
    /// Most recent transactions, oldest first
    pub recent_transactions: Vec<Transaction>,
}

impl MonthlyReport {
    /// Snapshot a budget, keeping the last `recent` transactions
    pub fn generate(budget: &Budget, recent: usize) -> Self {
        Self {
            balance: BalanceSummary {
                initial_balance: budget.initial_balance(),
                total_income: budget.total_income(),
                total_expenses: budget.total_expenses(),
                current_balance: budget.calculate_balance(),
            },
            categories: budget.categories().to_vec(),
            transaction_count: budget.transactions().len(),
            recent_transactions: budget.recent_transactions(recent).to_vec(),
        }
    }

    /// Categories whose spending exceeds their limit
    pub fn over_budget_categories(&self) -> Vec<&Category> {
        self.categories
            .iter()
            .filter(|c| c.is_over_budget())
            .collect()
    }

    /// Render in the requested format
    pub fn render(&self, format: ReportFormat) -> PlannerResult<String> {
        match format {
            ReportFormat::Text => Ok(self.format_terminal()),
            ReportFormat::Json => self.to_json(),
            ReportFormat::Yaml => self.to_yaml(),
            ReportFormat::Csv => {
                let mut buffer = Vec::new();
                self.export_csv(&mut buffer)?;
                String::from_utf8(buffer).map_err(|e| PlannerError::Export(e.to_string()))
            }
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();
        let rule = "=".repeat(RULE_WIDTH);

        output.push_str(&rule);
        output.push('\n');
        output.push_str("MONTHLY BUDGET REPORT\n");
        output.push_str(&rule);
        output.push('\n');

        output.push_str("\nBALANCE SUMMARY:\n");
        output.push_str(&format!(
            "   Initial Balance:  {}\n",
            self.balance.initial_balance
        ));
        output.push_str(&format!("   Total Income:     {}\n", self.balance.total_income));
        output.push_str(&format!(
            "   Total Expenses:   {}\n",
            self.balance.total_expenses
        ));
        output.push_str(&format!(
            "   Current Balance:  {}\n",
            self.balance.current_balance
        ));

        output.push_str("\nCATEGORY BREAKDOWN:\n");
        if self.categories.is_empty() {
            output.push_str("   No categories created yet.\n");
        } else {
            for category in &self.categories {
                output.push_str(&format!("   {}\n", category));
            }
        }

        output.push_str(&format!(
            "\nRECENT TRANSACTIONS ({} total):\n",
            self.transaction_count
        ));
        if self.recent_transactions.is_empty() {
            output.push_str("   No transactions yet.\n");
        } else {
            for txn in &self.recent_transactions {
                output.push_str(&format!("   {}\n", txn));
            }
        }

        output.push_str(&rule);
        output.push('\n');

        output
    }

    pub fn to_json(&self) -> PlannerResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_yaml(&self) -> PlannerResult<String> {
        serde_yaml::to_string(self).map_err(|e| PlannerError::Export(e.to_string()))
    }

    /// Export the category breakdown to CSV, with a totals row
    pub fn export_csv<W: std::io::Write>(&self, writer: W) -> PlannerResult<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        let export_err = |e: csv::Error| PlannerError::Export(e.to_string());

        wtr.write_record(["Category", "Spent", "Limit", "Remaining", "Usage", "Over Budget"])
            .map_err(export_err)?;

        for category in &self.categories {
            wtr.write_record([
                category.name().to_string(),
                format!("{:.2}", category.spent().as_f64()),
                format!("{:.2}", category.limit().as_f64()),
                format!("{:.2}", category.remaining().as_f64()),
                format!("{:.1}", category.usage_percentage()),
                category.is_over_budget().to_string(),
            ])
            .map_err(export_err)?;
        }

        let total_spent: Money = self.categories.iter().map(|c| c.spent()).sum();
        let total_limit: Money = self.categories.iter().map(|c| c.limit()).sum();
        wtr.write_record([
            "TOTAL".to_string(),
            format!("{:.2}", total_spent.as_f64()),
            format!("{:.2}", total_limit.as_f64()),
            format!("{:.2}", (total_limit - total_spent).as_f64()),
            String::new(),
            (total_spent > total_limit).to_string(),
        ])
        .map_err(export_err)?;

        wtr.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::DEFAULT_RECENT_TRANSACTIONS;

    fn dollars(d: i64) -> Money {
        Money::from_dollars_cents(d, 0)
    }

    fn setup_budget() -> Budget {
        let mut budget = Budget::new(dollars(100));
        budget.add_category("Food", dollars(50)).unwrap();
        budget.add_category("Rent", dollars(800)).unwrap();
        budget
            .add_transaction(
                Transaction::income(dollars(1000), "salary")
                    .unwrap()
                    .with_date("2025-01-01"),
            )
            .unwrap();
        budget
            .add_transaction(
                Transaction::expense(dollars(60), "Food", "groceries")
                    .unwrap()
                    .with_date("2025-01-03"),
            )
            .unwrap();
        budget
    }

    #[test]
    fn test_generate_report() {
        let budget = setup_budget();
        let report = budget.monthly_report(DEFAULT_RECENT_TRANSACTIONS);

        assert_eq!(report.balance.initial_balance, dollars(100));
        assert_eq!(report.balance.total_income, dollars(1000));
        assert_eq!(report.balance.total_expenses, dollars(60));
        assert_eq!(report.balance.current_balance, dollars(1040));
        assert_eq!(report.categories.len(), 2);
        assert_eq!(report.transaction_count, 2);
        assert_eq!(report.recent_transactions.len(), 2);

        let over: Vec<&str> = report
            .over_budget_categories()
            .iter()
            .map(|c| c.name())
            .collect();
        assert_eq!(over, vec!["Food"]);
    }

    #[test]
    fn test_last_ten_transactions() {
        let mut budget = Budget::new(Money::zero());
        for amount in 1..=11 {
            budget
                .add_transaction(Transaction::income(dollars(amount), format!("#{}", amount)).unwrap())
                .unwrap();
        }

        let report = budget.monthly_report(DEFAULT_RECENT_TRANSACTIONS);
        assert_eq!(report.transaction_count, 11);
        let notes: Vec<&str> = report.recent_transactions.iter().map(|t| t.note()).collect();
        let expected: Vec<String> = (2..=11).map(|n| format!("#{}", n)).collect();
        assert_eq!(notes, expected);

        let output = report.format_terminal();
        assert!(output.contains("RECENT TRANSACTIONS (11 total):"));
        assert!(!output.contains("INCOME: $1.00 - #1\n"));
        assert!(output.contains("INCOME: $11.00 - #11\n"));
    }

    #[test]
    fn test_report_does_not_mutate() {
        let budget = setup_budget();
        let before = budget.transactions().to_vec();
        let _ = budget.monthly_report(3);
        assert_eq!(budget.transactions(), before.as_slice());
    }

    #[test]
    fn test_terminal_format() {
        let output = setup_budget().monthly_report(10).format_terminal();

        assert!(output.contains("MONTHLY BUDGET REPORT"));
        assert!(output.contains("   Initial Balance:  $100.00\n"));
        assert!(output.contains("   Current Balance:  $1040.00\n"));
        assert!(output.contains("   Food: $60.00 / $50.00 (120.0%) OVER BUDGET!\n"));
        assert!(output.contains("   Rent: $0.00 / $800.00 (0.0%) ✓\n"));
        assert!(output.contains("   [2025-01-03] EXPENSE (Food): $60.00 - groceries\n"));
    }

    #[test]
    fn test_terminal_format_empty() {
        let output = Budget::new(Money::zero()).monthly_report(10).format_terminal();
        assert!(output.contains("No categories created yet."));
        assert!(output.contains("RECENT TRANSACTIONS (0 total):"));
        assert!(output.contains("No transactions yet."));
    }

    #[test]
    fn test_csv_export() {
        let report = setup_budget().monthly_report(10);
        let output = report.render(ReportFormat::Csv).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "Category,Spent,Limit,Remaining,Usage,Over Budget");
        assert_eq!(lines[1], "Food,60.00,50.00,-10.00,120.0,true");
        assert_eq!(lines[2], "Rent,0.00,800.00,800.00,0.0,false");
        assert_eq!(lines[3], "TOTAL,60.00,850.00,790.00,,false");
    }

    #[test]
    fn test_json_export() {
        let report = setup_budget().monthly_report(10);
        let json: serde_json::Value =
            serde_json::from_str(&report.render(ReportFormat::Json).unwrap()).unwrap();

        assert_eq!(json["balance"]["current_balance"], 104000);
        assert_eq!(json["categories"][0]["name"], "Food");
        assert_eq!(json["recent_transactions"][1]["type"], "expense");
    }

    #[test]
    fn test_yaml_export() {
        let output = setup_budget().monthly_report(10).to_yaml().unwrap();
        assert!(output.contains("transaction_count: 2"));
        assert!(output.contains("name: Food"));
    }
}
