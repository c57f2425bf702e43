//! Expense CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use crate::display::format_expense_table;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{ExpenseDraft, Money};
use crate::store::DomainStore;

#[derive(Subcommand)]
pub enum ExpenseCommands {
    /// Record a new expense
    Add {
        /// Description of the expense
        description: String,
        /// Amount, e.g. "85.60"
        amount: String,
        /// Category name or id
        #[arg(short, long)]
        category: String,
        /// Expense date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },
    /// List all expenses, newest first
    List,
    /// Edit an expense by id
    Edit {
        /// Expense id (full or short form)
        id: String,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New amount
        #[arg(long)]
        amount: Option<String>,
        /// New category name or id
        #[arg(long)]
        category: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },
    /// Delete an expense by id
    Delete {
        /// Expense id (full or short form)
        id: String,
    },
}

pub fn handle_expense_command(store: &mut DomainStore, cmd: ExpenseCommands) -> BudgetResult<()> {
    match cmd {
        ExpenseCommands::Add {
            description,
            amount,
            category,
            date,
        } => {
            let amount = parse_amount(&amount)?;
            let date = parse_date(date.as_deref())?;
            let category_id = store
                .find_category(&category)
                .ok_or_else(|| BudgetError::category_not_found(&category))?
                .id;

            if description.trim().is_empty() {
                return Err(BudgetError::Validation(
                    "Expense description cannot be empty".into(),
                ));
            }

            let id = store.add_expense(ExpenseDraft {
                description: description.clone(),
                amount,
                category_id,
                date,
            });
            println!("Added expense {}: {} ({})", id.short(), description, amount);
        }
        ExpenseCommands::List => {
            println!(
                "{}",
                format_expense_table(store.expenses(), store.categories(), store.currency())
            );
        }
        ExpenseCommands::Edit {
            id,
            description,
            amount,
            category,
            date,
        } => {
            let mut expense = store
                .find_expense(&id)
                .ok_or_else(|| BudgetError::expense_not_found(&id))?
                .clone();

            if let Some(description) = description {
                if description.trim().is_empty() {
                    return Err(BudgetError::Validation(
                        "Expense description cannot be empty".into(),
                    ));
                }
                expense.description = description;
            }
            if let Some(amount) = amount {
                expense.amount = parse_amount(&amount)?;
            }
            if let Some(category) = category {
                expense.category_id = store
                    .find_category(&category)
                    .ok_or_else(|| BudgetError::category_not_found(&category))?
                    .id;
            }
            if let Some(date) = date {
                expense.date = parse_date(Some(&date))?;
            }

            let short = expense.id.short();
            store.edit_expense(expense)?;
            println!("Updated expense {}", short);
        }
        ExpenseCommands::Delete { id } => {
            let expense_id = store
                .find_expense(&id)
                .ok_or_else(|| BudgetError::expense_not_found(&id))?
                .id;
            store.delete_expense(expense_id)?;
            println!("Deleted expense {}", expense_id.short());
        }
    }

    Ok(())
}

/// Parse a user-supplied amount, rejecting negatives at the input edge
fn parse_amount(input: &str) -> BudgetResult<Money> {
    let amount =
        Money::parse(input).map_err(|e| BudgetError::Validation(e.to_string()))?;
    if amount.is_negative() {
        return Err(BudgetError::Validation(
            "Expense amount cannot be negative".into(),
        ));
    }
    Ok(amount)
}

fn parse_date(input: Option<&str>) -> BudgetResult<NaiveDate> {
    match input {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| BudgetError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", s))),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("85.60").unwrap(), Money::from_cents(8560));
        assert!(parse_amount("-1.00").is_err());
        assert!(parse_amount("abc").is_err());
    }

    #[test]
    fn test_parse_date() {
        let date = parse_date(Some("2024-07-28")).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 7, 28).unwrap());
        assert!(parse_date(Some("28/07/2024")).is_err());
        assert!(parse_date(None).is_ok());
    }
}
