//! Expense display formatting

use tabled::{settings::Style, Table, Tabled};

use crate::models::{Category, Expense};

#[derive(Tabled)]
struct ExpenseRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

/// Format expenses as a table, insertion order (newest first)
pub fn format_expense_table(
    expenses: &[Expense],
    categories: &[Category],
    currency: &str,
) -> String {
    if expenses.is_empty() {
        return "No expenses recorded yet.".to_string();
    }

    let rows: Vec<ExpenseRow> = expenses
        .iter()
        .map(|expense| {
            let category = categories
                .iter()
                .find(|c| c.id == expense.category_id)
                .map(|c| c.name.clone())
                .unwrap_or_else(|| "(deleted)".to_string());

            ExpenseRow {
                id: expense.id.short(),
                date: expense.date.format("%Y-%m-%d").to_string(),
                description: expense.description.clone(),
                category,
                amount: format!("{} {}", expense.amount, currency),
            }
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}
