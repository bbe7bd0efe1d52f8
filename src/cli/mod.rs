//! CLI front end
//!
//! This module contains the interactive menu and its prompt helpers,
//! bridging user input with the budget service.

pub mod menu;
pub mod prompt;

pub use menu::{Menu, MenuChoice};
pub use prompt::Prompter;
