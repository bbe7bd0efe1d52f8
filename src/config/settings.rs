//! User settings for the budget planner
//!
//! Presentation preferences only: how transaction dates are written, how
//! many transactions the monthly report lists, the report format, and the
//! default log level.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::PlannerPaths;
use crate::error::PlannerError;
use crate::models::transaction::DEFAULT_DATE_FORMAT;
use crate::reports::ReportFormat;
use crate::services::DEFAULT_RECENT_TRANSACTIONS;

/// User settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Date format for new transactions (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// How many transactions the monthly report lists
    #[serde(default = "default_recent_transactions")]
    pub recent_transactions: usize,

    /// Format used when showing the monthly report
    #[serde(default)]
    pub report_format: ReportFormat,

    /// Default log filter when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_recent_transactions() -> usize {
    DEFAULT_RECENT_TRANSACTIONS
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            date_format: default_date_format(),
            recent_transactions: default_recent_transactions(),
            report_format: ReportFormat::default(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_default(paths: &PlannerPaths) -> Result<Self, PlannerError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| PlannerError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| PlannerError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &PlannerPaths) -> Result<(), PlannerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| PlannerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| PlannerError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject settings that would make the planner misbehave
    pub fn validate(&self) -> Result<(), PlannerError> {
        if self.date_format.trim().is_empty() {
            return Err(PlannerError::Config("date_format cannot be empty".into()));
        }
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(PlannerError::Config(format!(
                "date_format is not a valid strftime format: {}",
                self.date_format
            )));
        }
        if self.recent_transactions == 0 {
            return Err(PlannerError::Config(
                "recent_transactions must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.date_format, "%Y-%m-%d");
        assert_eq!(settings.recent_transactions, 10);
        assert_eq!(settings.report_format, ReportFormat::Text);
        assert_eq!(settings.log_level, "warn");
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PlannerPaths::with_config_dir(temp_dir.path().to_path_buf());

        let settings = Settings::load_or_default(&paths).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PlannerPaths::with_config_dir(temp_dir.path().to_path_buf());

        let settings = Settings {
            recent_transactions: 5,
            report_format: ReportFormat::Json,
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_default(&paths).unwrap();
        assert_eq!(loaded.recent_transactions, 5);
        assert_eq!(loaded.report_format, ReportFormat::Json);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PlannerPaths::with_config_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{ "report_format": "csv" }"#).unwrap();

        let loaded = Settings::load_or_default(&paths).unwrap();
        assert_eq!(loaded.report_format, ReportFormat::Csv);
        assert_eq!(loaded.recent_transactions, 10);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PlannerPaths::with_config_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{ "recent_transactions": 0 }"#).unwrap();

        let err = Settings::load_or_default(&paths).unwrap_err();
        assert!(matches!(err, PlannerError::Config(_)));

        std::fs::write(paths.settings_file(), r#"{ "date_format": "%Q" }"#).unwrap();
        let err = Settings::load_or_default(&paths).unwrap_err();
        assert!(matches!(err, PlannerError::Config(_)));

        std::fs::write(paths.settings_file(), "not json").unwrap();
        let err = Settings::load_or_default(&paths).unwrap_err();
        assert!(matches!(err, PlannerError::Config(_)));
    }
}
