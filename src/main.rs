use std::io;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use budget_planner::cli::Menu;
use budget_planner::config::{PlannerPaths, Settings};
use budget_planner::logging::{effective_level, init_tracing};
use budget_planner::models::Money;
use budget_planner::reports::ReportFormat;

#[derive(Parser)]
#[command(
    name = "budget",
    version,
    about = "Track income and expenses against category limits",
    long_about = "Budget Planner records income and expenses against named \
                  spending categories, keeps a running balance, and prints a \
                  monthly summary. Everything lives in memory for one session."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Starting balance (skips the opening prompt)
    #[arg(long, global = true, allow_hyphen_values = true)]
    initial_balance: Option<String>,

    /// Report format, overriding the settings file
    #[arg(long, global = true, value_enum)]
    report_format: Option<ReportFormat>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session (default)
    Run,

    /// Write a default settings file
    Init,

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = PlannerPaths::new()?;
    let mut settings = Settings::load_or_default(&paths)?;
    if let Some(format) = cli.report_format {
        settings.report_format = format;
    }

    init_tracing(effective_level(&settings.log_level, cli.verbose));

    match cli.command {
        None | Some(Commands::Run) => {
            let initial_balance = cli
                .initial_balance
                .as_deref()
                .map(Money::parse)
                .transpose()
                .context("Invalid --initial-balance")?;

            let stdin = io::stdin();
            let mut menu = Menu::new(stdin.lock(), io::stdout(), settings)?;
            menu.run(initial_balance)?;
        }
        Some(Commands::Init) => {
            if paths.is_initialized() {
                println!(
                    "Settings already exist at: {}",
                    paths.settings_file().display()
                );
            } else {
                Settings::default().save(&paths)?;
                println!("Wrote default settings to: {}", paths.settings_file().display());
            }
        }
        Some(Commands::Config) => {
            println!("Budget Planner Configuration");
            println!("============================");
            println!("Config directory: {}", paths.config_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!();
            println!("Settings:");
            println!("  Date format:         {}", settings.date_format);
            println!("  Recent transactions: {}", settings.recent_transactions);
            println!("  Report format:       {}", settings.report_format);
            println!("  Log level:           {}", settings.log_level);
        }
    }

    Ok(())
}
