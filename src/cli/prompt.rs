//! Line-oriented prompts
//!
//! Reads answers from any `BufRead` and writes prompts to any `Write`, so the
//! menu can be driven by a terminal or by a script in tests. Every read
//! returns `None` once input is exhausted.

use std::io::{BufRead, Write};

use crate::error::PlannerResult;
use crate::models::{Money, MoneyParseError};

/// Prompt reader/writer pair
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Write a line of output
    pub fn say(&mut self, message: &str) -> PlannerResult<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }

    /// Write raw text without a trailing newline
    pub fn write_raw(&mut self, text: &str) -> PlannerResult<()> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        Ok(())
    }

    /// Show a prompt and read one trimmed line
    pub fn ask(&mut self, prompt: &str) -> PlannerResult<Option<String>> {
        self.write_raw(prompt)?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Ask until the answer is a positive amount
    pub fn ask_positive_amount(&mut self, prompt: &str) -> PlannerResult<Option<Money>> {
        loop {
            let Some(answer) = self.ask(prompt)? else {
                return Ok(None);
            };

            match Money::parse(&answer) {
                Ok(amount) if amount.is_positive() => return Ok(Some(amount)),
                Ok(_) => self.say("⚠ Please enter a positive number!")?,
                Err(MoneyParseError::TooPrecise(_)) => {
                    self.say("⚠ Please enter at most two decimal places!")?
                }
                Err(_) => self.say("⚠ Invalid input! Please enter a number.")?,
            }
        }
    }

    /// Give back the output sink
    pub fn into_output(self) -> W {
        self.output
    }
}
