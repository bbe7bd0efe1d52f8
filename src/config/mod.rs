//! Configuration module for the budget planner
//!
//! This module provides configuration management including:
//! - XDG-compliant config directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::PlannerPaths;
pub use settings::Settings;
