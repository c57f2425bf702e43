use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use budgetwise::cli::{
    handle_budget_command, handle_category_command, handle_dashboard, handle_expense_command,
    handle_import, handle_insights, BudgetCommands, CategoryCommands, ExpenseCommands,
};
use budgetwise::config::{BudgetPaths, Settings};
use budgetwise::storage::JsonSnapshotStore;
use budgetwise::store::DomainStore;

#[derive(Parser)]
#[command(
    name = "budgetwise",
    version,
    about = "Personal budgeting with AI-assisted import and insights",
    long_about = "BudgetWise tracks your expenses against monthly category \
                  budgets, imports transactions from spreadsheet exports \
                  through an AI extraction flow, and generates personalized \
                  spending insights."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Category management commands
    #[command(subcommand, alias = "cat")]
    Category(CategoryCommands),

    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Show the spending dashboard
    Dashboard,

    /// Import expenses from a CSV export via AI extraction
    Import {
        /// Path to the CSV file
        file: PathBuf,
    },

    /// Generate AI spending insights
    Insights,

    /// Set the currency code (e.g. USD, EUR)
    Currency {
        /// Three-letter currency code
        code: String,
    },

    /// Reset all data to the built-in defaults
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("budgetwise=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let paths = BudgetPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let mut store = DomainStore::new(Box::new(JsonSnapshotStore::new(paths.snapshot_file())));
    store.hydrate();

    match cli.command {
        Some(Commands::Expense(cmd)) => {
            handle_expense_command(&mut store, cmd)?;
        }
        Some(Commands::Category(cmd)) => {
            handle_category_command(&mut store, cmd)?;
        }
        Some(Commands::Budget(cmd)) => {
            handle_budget_command(&mut store, cmd)?;
        }
        Some(Commands::Dashboard) => {
            handle_dashboard(&store)?;
        }
        Some(Commands::Import { file }) => {
            handle_import(&mut store, &settings, &file)?;
        }
        Some(Commands::Insights) => {
            handle_insights(&store, &settings)?;
        }
        Some(Commands::Currency { code }) => {
            let code = code.to_uppercase();
            if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
                anyhow::bail!("'{}' is not a three-letter currency code", code);
            }
            store.set_currency(code.clone());
            println!("Currency set to {}", code);
        }
        Some(Commands::Reset { yes }) => {
            if !yes {
                println!("This will erase all expenses and restore the default categories.");
                println!("Re-run with --yes to confirm.");
            } else {
                store.reset_data();
                println!("All data has been reset to the default state.");
            }
        }
        Some(Commands::Config) => {
            println!("BudgetWise configuration");
            println!("========================");
            println!("Base directory: {}", paths.base_dir().display());
            println!("Data file:      {}", paths.snapshot_file().display());
            println!();
            println!("Settings:");
            println!("  Default currency: {}", settings.default_currency);
            println!("  Gateway model:    {}", settings.gateway.model);
        }
        None => {
            println!("BudgetWise - personal budgeting from the command line");
            println!();
            println!("Run 'budgetwise --help' for usage information.");
            println!("Run 'budgetwise dashboard' to see your spending overview.");
        }
    }

    // One last chance for a snapshot that failed its first write
    if store.has_unsaved_changes() {
        store.flush_pending();
    }

    Ok(())
}
