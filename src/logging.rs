//! Tracing setup
//!
//! Log output goes to stderr so it never interleaves with the menu on stdout.

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Levels in increasing verbosity, indexed by `-v` count from the base level
const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Pick the default filter directive from a configured level and a `-v` count
///
/// Unknown configured levels are treated as "warn".
pub fn effective_level(configured: &str, verbosity: u8) -> &'static str {
    let base = LEVELS
        .iter()
        .position(|level| level.eq_ignore_ascii_case(configured.trim()))
        .unwrap_or(1);
    let index = (base + verbosity as usize).min(LEVELS.len() - 1);
    LEVELS[index]
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over `default_level`. Calling this more than
/// once is a no-op.
pub fn init_tracing(default_level: &str) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("budget_planner={}", default_level)));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_level() {
        assert_eq!(effective_level("warn", 0), "warn");
        assert_eq!(effective_level("warn", 1), "info");
        assert_eq!(effective_level("WARN", 2), "debug");
        assert_eq!(effective_level("info", 9), "trace");
        assert_eq!(effective_level("nonsense", 0), "warn");
        assert_eq!(effective_level("error", 0), "error");
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init_tracing("warn");
        init_tracing("debug");
    }
}
