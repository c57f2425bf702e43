//! Category display formatting

use tabled::{settings::Style, Table, Tabled};

use crate::models::Category;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Id")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Icon")]
    icon: String,
    #[tabled(rename = "Color")]
    color: String,
    #[tabled(rename = "Monthly budget")]
    budget: String,
}

/// Format categories as a table
pub fn format_category_table(categories: &[Category], currency: &str) -> String {
    if categories.is_empty() {
        return "No categories defined.".to_string();
    }

    let rows: Vec<CategoryRow> = categories
        .iter()
        .map(|category| CategoryRow {
            id: category.id.short(),
            name: category.name.clone(),
            icon: category.icon.clone(),
            color: category.color.clone(),
            budget: format!("{} {}", category.budget, currency),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}
