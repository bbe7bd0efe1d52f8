//! Interactive budget menu
//!
//! The numbered menu that drives a [`Budget`] for one session. Rejections
//! from the budget are printed and the loop carries on.

use std::fmt;
use std::io::{BufRead, Write};

use tracing::debug;

use super::prompt::Prompter;
use crate::config::Settings;
use crate::error::{PlannerError, PlannerResult};
use crate::models::transaction::today;
use crate::models::{Money, Transaction};
use crate::services::Budget;

const MENU_WIDTH: usize = 50;

/// One entry of the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddCategory,
    AddIncome,
    AddExpense,
    ShowBalance,
    ShowReport,
    Exit,
}

impl MenuChoice {
    /// All choices in menu order
    pub fn all() -> &'static [Self] {
        &[
            Self::AddCategory,
            Self::AddIncome,
            Self::AddExpense,
            Self::ShowBalance,
            Self::ShowReport,
            Self::Exit,
        ]
    }

    /// Parse the number typed at the menu prompt
    pub fn parse(input: &str) -> Option<Self> {
        let index: usize = input.trim().parse().ok()?;
        Self::all().get(index.checked_sub(1)?).copied()
    }

    pub fn number(&self) -> usize {
        Self::all()
            .iter()
            .position(|choice| choice == self)
            .map_or(0, |index| index + 1)
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::AddCategory => "Add category",
            Self::AddIncome => "Add income",
            Self::AddExpense => "Add expense",
            Self::ShowBalance => "Show balance",
            Self::ShowReport => "Show monthly report",
            Self::Exit => "Exit",
        };
        write!(f, "{}. {}", self.number(), label)
    }
}

/// Whether the loop keeps going after an action
enum Flow {
    Continue,
    Stop,
}

/// An interactive session over a budget
pub struct Menu<R, W> {
    prompter: Prompter<R, W>,
    settings: Settings,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    /// # Errors
    ///
    /// Returns a config error if `settings` fail validation.
    pub fn new(input: R, output: W, settings: Settings) -> PlannerResult<Self> {
        settings.validate()?;
        Ok(Self {
            prompter: Prompter::new(input, output),
            settings,
        })
    }

    /// Run the session until the user exits or input ends
    ///
    /// With no `initial_balance` the user is asked for one. Returns the
    /// budget as it stood at the end of the session.
    pub fn run(&mut self, initial_balance: Option<Money>) -> PlannerResult<Budget> {
        self.prompter.say("\nWelcome to Budget Planner!")?;

        let initial = match initial_balance {
            Some(amount) => amount,
            None => self.ask_initial_balance()?,
        };
        let mut budget = Budget::new(initial);

        loop {
            self.print_menu()?;
            let Some(answer) = self.prompter.ask("Enter your choice (1-6): ")? else {
                debug!("input closed, leaving menu");
                break;
            };

            let flow = match MenuChoice::parse(&answer) {
                Some(choice) => self.handle(choice, &mut budget)?,
                None => {
                    self.prompter
                        .say("⚠ Invalid choice! Please enter a number between 1 and 6.")?;
                    Flow::Continue
                }
            };

            if let Flow::Stop = flow {
                break;
            }
        }

        Ok(budget)
    }

    fn ask_initial_balance(&mut self) -> PlannerResult<Money> {
        let answer = self
            .prompter
            .ask("Enter your initial balance (or 0): $")?
            .unwrap_or_default();

        match Money::parse(&answer) {
            Ok(amount) => Ok(amount),
            Err(_) => {
                self.prompter.say("Invalid input. Starting with $0.00")?;
                Ok(Money::zero())
            }
        }
    }

    fn print_menu(&mut self) -> PlannerResult<()> {
        let rule = "=".repeat(MENU_WIDTH);
        self.prompter.say(&format!("\n{}", rule))?;
        self.prompter.say("BUDGET PLANNER")?;
        self.prompter.say(&rule)?;
        for choice in MenuChoice::all() {
            self.prompter.say(&choice.to_string())?;
        }
        self.prompter.say(&rule)
    }

    fn handle(&mut self, choice: MenuChoice, budget: &mut Budget) -> PlannerResult<Flow> {
        debug!(?choice, "menu choice");
        match choice {
            MenuChoice::AddCategory => self.add_category(budget),
            MenuChoice::AddIncome => self.add_income(budget),
            MenuChoice::AddExpense => self.add_expense(budget),
            MenuChoice::ShowBalance => {
                self.prompter.say(&format!(
                    "\nCurrent Balance: {}",
                    budget.calculate_balance()
                ))?;
                Ok(Flow::Continue)
            }
            MenuChoice::ShowReport => {
                let report = budget.monthly_report(self.settings.recent_transactions);
                let rendered = report.render(self.settings.report_format)?;
                self.prompter.write_raw("\n")?;
                self.prompter.write_raw(&rendered)?;
                Ok(Flow::Continue)
            }
            MenuChoice::Exit => {
                self.prompter.say("\nThank you for using Budget Planner!")?;
                self.prompter.say("Remember to track your spending regularly!")?;
                Ok(Flow::Stop)
            }
        }
    }

    fn add_category(&mut self, budget: &mut Budget) -> PlannerResult<Flow> {
        let Some(name) = self.prompter.ask("Enter category name: ")? else {
            return Ok(Flow::Stop);
        };
        if name.is_empty() {
            self.prompter.say("⚠ Category name cannot be empty!")?;
            return Ok(Flow::Continue);
        }

        let prompt = format!("Enter monthly limit for '{}': $", name);
        let Some(limit) = self.prompter.ask_positive_amount(&prompt)? else {
            return Ok(Flow::Stop);
        };

        let outcome = budget.add_category(&name, limit).map(|category| {
            format!(
                "✓ Category '{}' created with limit {}",
                category.name(),
                category.limit()
            )
        });
        self.report_outcome(outcome)
    }

    fn add_income(&mut self, budget: &mut Budget) -> PlannerResult<Flow> {
        let Some(amount) = self.prompter.ask_positive_amount("Enter income amount: $")? else {
            return Ok(Flow::Stop);
        };
        let Some(note) = self.prompter.ask("Enter description (optional): ")? else {
            return Ok(Flow::Stop);
        };

        let date = today(&self.settings.date_format);
        let outcome = Transaction::income(amount, note)
            .map(|txn| txn.with_date(date))
            .and_then(|txn| budget.add_transaction(txn).map(|t| t.to_string()))
            .map(|txn| format!("✓ Transaction added: {}", txn));
        self.report_outcome(outcome)
    }

    fn add_expense(&mut self, budget: &mut Budget) -> PlannerResult<Flow> {
        let names: Vec<String> = budget
            .category_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        if names.is_empty() {
            self.prompter
                .say("⚠ No categories available! Please create a category first.")?;
            return Ok(Flow::Continue);
        }

        self.prompter.say("\nAvailable categories:")?;
        for (i, name) in names.iter().enumerate() {
            self.prompter.say(&format!("  {}. {}", i + 1, name))?;
        }

        let Some(answer) = self.prompter.ask("Enter category number: ")? else {
            return Ok(Flow::Stop);
        };
        let category = match answer.parse::<usize>() {
            Ok(number) => match number.checked_sub(1).and_then(|i| names.get(i)) {
                Some(name) => name.clone(),
                None => {
                    self.prompter.say("⚠ Invalid category number!")?;
                    return Ok(Flow::Continue);
                }
            },
            Err(_) => {
                self.prompter.say("⚠ Invalid input!")?;
                return Ok(Flow::Continue);
            }
        };

        let Some(amount) = self.prompter.ask_positive_amount("Enter expense amount: $")? else {
            return Ok(Flow::Stop);
        };
        let Some(note) = self.prompter.ask("Enter description (optional): ")? else {
            return Ok(Flow::Stop);
        };

        let date = today(&self.settings.date_format);
        let outcome = Transaction::expense(amount, category, note)
            .map(|txn| txn.with_date(date))
            .and_then(|txn| budget.add_transaction(txn).map(|t| t.to_string()))
            .map(|txn| format!("✓ Transaction added: {}", txn));
        self.report_outcome(outcome)
    }

    /// Print the result of a budget operation; domain errors don't end the session
    fn report_outcome(&mut self, outcome: PlannerResult<String>) -> PlannerResult<Flow> {
        match outcome {
            Ok(message) => self.prompter.say(&message)?,
            Err(err @ PlannerError::Io(_)) => return Err(err),
            Err(err) => self.prompter.say(&format!("⚠ Error: {}", err))?,
        }
        Ok(Flow::Continue)
    }

    /// Give back the output sink
    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }
}
