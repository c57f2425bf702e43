//! Dashboard display formatting
//!
//! Renders the overview figures, the per-category budget table, and the
//! recent-expense list.

use tabled::{settings::Style, Table, Tabled};

use crate::models::{Category, Expense};
use crate::reports::DashboardSummary;

use super::expense::format_expense_table;

#[derive(Tabled)]
struct SpendingRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Budget")]
    budget: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
}

/// Render the full dashboard view
pub fn format_dashboard(
    summary: &DashboardSummary,
    recent: &[Expense],
    categories: &[Category],
    currency: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Total budget:    {} {}\n\
         Total spent:     {} {}\n\
         Remaining:       {} {}\n\
         Spending:        {:.0}% of budget\n\n",
        summary.total_budget,
        currency,
        summary.total_spent,
        currency,
        summary.total_remaining,
        currency,
        summary.spending_percentage,
    ));

    if summary.by_category.is_empty() {
        output.push_str("No categories defined.\n");
    } else {
        let rows: Vec<SpendingRow> = summary
            .by_category
            .iter()
            .map(|entry| SpendingRow {
                category: entry.category.name.clone(),
                budget: format!("{} {}", entry.category.budget, currency),
                spent: format!("{} {}", entry.spent, currency),
                remaining: format!("{} {}", entry.remaining, currency),
            })
            .collect();

        let mut table = Table::new(rows);
        table.with(Style::rounded());
        output.push_str(&table.to_string());
        output.push('\n');
    }

    output.push_str("\nRecent expenses:\n");
    output.push_str(&format_expense_table(recent, categories, currency));

    output
}
