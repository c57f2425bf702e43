//! Budget CLI commands
//!
//! Budget edits go through the store's bulk `update_budgets` operation: the
//! handler rebuilds the full category list with the change applied and
//! overwrites the collection, matching the manage-budgets flow of the app.

use clap::Subcommand;

use crate::error::{BudgetError, BudgetResult};
use crate::models::Money;
use crate::reports::DashboardSummary;
use crate::store::DomainStore;

#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Show budgets with spent and remaining amounts
    Show,
    /// Set the monthly budget for a category
    Set {
        /// Category name or id
        category: String,
        /// New monthly budget, e.g. "400"
        amount: String,
    },
}

pub fn handle_budget_command(store: &mut DomainStore, cmd: BudgetCommands) -> BudgetResult<()> {
    match cmd {
        BudgetCommands::Show => {
            let summary = DashboardSummary::generate(store.categories(), store.expenses());
            let currency = store.currency().to_string();

            for entry in &summary.by_category {
                println!(
                    "{:<20} budget {:>10} {}   spent {:>10} {}   remaining {:>10} {}",
                    entry.category.name,
                    entry.category.budget.to_string(),
                    currency,
                    entry.spent.to_string(),
                    currency,
                    entry.remaining.to_string(),
                    currency,
                );
            }
            println!(
                "\nTotal: budget {} {}, spent {} {} ({:.0}%)",
                summary.total_budget,
                currency,
                summary.total_spent,
                currency,
                summary.spending_percentage
            );
        }
        BudgetCommands::Set { category, amount } => {
            let amount = Money::parse(&amount)
                .map_err(|e| BudgetError::Validation(e.to_string()))?;
            if amount.is_negative() {
                return Err(BudgetError::Validation("Budget cannot be negative".into()));
            }

            let target = store
                .find_category(&category)
                .ok_or_else(|| BudgetError::category_not_found(&category))?;
            let target_id = target.id;
            let name = target.name.clone();

            let updated: Vec<_> = store
                .categories()
                .iter()
                .cloned()
                .map(|mut c| {
                    if c.id == target_id {
                        c.budget = amount;
                    }
                    c
                })
                .collect();
            store.update_budgets(updated);

            println!(
                "Set monthly budget for '{}' to {} {}",
                name,
                amount,
                store.currency()
            );
        }
    }

    Ok(())
}
