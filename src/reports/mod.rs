//! Reports module for the budget planner
//!
//! Provides the monthly budget report and the formats it can be rendered in.

pub mod monthly;

pub use monthly::{BalanceSummary, MonthlyReport};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Human-readable terminal layout
    #[default]
    Text,
    Json,
    Yaml,
    /// Category breakdown only
    Csv,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
            Self::Csv => write!(f, "csv"),
        }
    }
}
