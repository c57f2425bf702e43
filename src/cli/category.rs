//! Category CLI commands

use clap::Subcommand;

use crate::display::format_category_table;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{CategoryDraft, Money};
use crate::store::DomainStore;

#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Create a new category
    Add {
        /// Category name
        name: String,
        /// Monthly budget, e.g. "200"
        #[arg(short, long, default_value = "0")]
        budget: String,
        /// Icon hint for the view layer
        #[arg(long, default_value = "Tag")]
        icon: String,
        /// Color hint for the view layer
        #[arg(long, default_value = "slate")]
        color: String,
    },
    /// List all categories
    List,
    /// Edit a category
    Edit {
        /// Category name or id
        category: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New monthly budget
        #[arg(long)]
        budget: Option<String>,
        /// New icon hint
        #[arg(long)]
        icon: Option<String>,
        /// New color hint
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete a category and every expense assigned to it
    Delete {
        /// Category name or id
        category: String,
    },
}

pub fn handle_category_command(store: &mut DomainStore, cmd: CategoryCommands) -> BudgetResult<()> {
    match cmd {
        CategoryCommands::Add {
            name,
            budget,
            icon,
            color,
        } => {
            let budget = parse_budget(&budget)?;
            if store.find_category(&name).is_some() {
                return Err(BudgetError::Validation(format!(
                    "A category named '{}' already exists",
                    name
                )));
            }

            let draft = CategoryDraft {
                name: name.clone(),
                icon,
                color,
                budget,
            };
            validate_draft(&draft)?;

            let id = store.add_category(draft);
            println!("Added category {}: {}", id.short(), name);
        }
        CategoryCommands::List => {
            println!(
                "{}",
                format_category_table(store.categories(), store.currency())
            );
        }
        CategoryCommands::Edit {
            category,
            name,
            budget,
            icon,
            color,
        } => {
            let mut updated = store
                .find_category(&category)
                .ok_or_else(|| BudgetError::category_not_found(&category))?
                .clone();

            if let Some(name) = name {
                updated.name = name;
            }
            if let Some(budget) = budget {
                updated.budget = parse_budget(&budget)?;
            }
            if let Some(icon) = icon {
                updated.icon = icon;
            }
            if let Some(color) = color {
                updated.color = color;
            }

            updated
                .validate()
                .map_err(|e| BudgetError::Validation(e.to_string()))?;

            let short = updated.id.short();
            store.edit_category(updated)?;
            println!("Updated category {}", short);
        }
        CategoryCommands::Delete { category } => {
            let target = store
                .find_category(&category)
                .ok_or_else(|| BudgetError::category_not_found(&category))?;
            let id = target.id;
            let name = target.name.clone();

            let cascade_count = store
                .expenses()
                .iter()
                .filter(|e| e.category_id == id)
                .count();

            store.delete_category(id)?;
            if cascade_count > 0 {
                println!(
                    "Deleted category '{}' and {} assigned expense(s)",
                    name, cascade_count
                );
            } else {
                println!("Deleted category '{}'", name);
            }
        }
    }

    Ok(())
}

fn parse_budget(input: &str) -> BudgetResult<Money> {
    let budget = Money::parse(input).map_err(|e| BudgetError::Validation(e.to_string()))?;
    if budget.is_negative() {
        return Err(BudgetError::Validation("Budget cannot be negative".into()));
    }
    Ok(budget)
}

fn validate_draft(draft: &CategoryDraft) -> BudgetResult<()> {
    if draft.name.trim().is_empty() {
        return Err(BudgetError::Validation("Category name cannot be empty".into()));
    }
    if draft.name.len() > 50 {
        return Err(BudgetError::Validation(format!(
            "Category name too long ({} chars, max 50)",
            draft.name.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_budget() {
        assert_eq!(parse_budget("400").unwrap(), Money::from_cents(40000));
        assert_eq!(parse_budget("150.50").unwrap(), Money::from_cents(15050));
        assert!(parse_budget("-10").is_err());
    }

    #[test]
    fn test_validate_draft() {
        let draft = CategoryDraft {
            name: "Pets".to_string(),
            icon: "Tag".to_string(),
            color: "slate".to_string(),
            budget: Money::zero(),
        };
        assert!(validate_draft(&draft).is_ok());

        let empty = CategoryDraft {
            name: "  ".to_string(),
            ..draft
        };
        assert!(validate_draft(&empty).is_err());
    }
}
