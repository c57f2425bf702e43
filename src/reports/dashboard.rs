//! Dashboard aggregation
//!
//! Computes the overview figures the dashboard renders: total budget, total
//! spending, per-category spent/remaining, and the recent-expense slice.
//! Pure functions over store state; nothing here mutates.

use std::collections::HashMap;

use crate::models::{Category, CategoryId, Expense, Money};

/// How many expenses the "recent" view shows
pub const RECENT_EXPENSE_COUNT: usize = 5;

/// Spending figures for one category
#[derive(Debug, Clone)]
pub struct CategorySpending {
    pub category: Category,
    /// Sum of expense amounts assigned to this category
    pub spent: Money,
    /// Budget minus spent; negative when over budget
    pub remaining: Money,
}

/// Aggregate dashboard figures
#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub total_budget: Money,
    pub total_spent: Money,
    pub total_remaining: Money,
    /// Spending as a percentage of total budget (0 when no budget is set)
    pub spending_percentage: f64,
    /// Per-category rows, in category-collection order
    pub by_category: Vec<CategorySpending>,
}

impl DashboardSummary {
    /// Build the summary over all recorded expenses
    pub fn generate(categories: &[Category], expenses: &[Expense]) -> Self {
        let mut spent_by_category: HashMap<CategoryId, Money> = HashMap::new();
        for expense in expenses {
            *spent_by_category
                .entry(expense.category_id)
                .or_insert_with(Money::zero) += expense.amount;
        }

        let by_category: Vec<CategorySpending> = categories
            .iter()
            .map(|category| {
                let spent = spent_by_category
                    .get(&category.id)
                    .copied()
                    .unwrap_or_else(Money::zero);
                CategorySpending {
                    remaining: category.budget - spent,
                    spent,
                    category: category.clone(),
                }
            })
            .collect();

        let total_budget: Money = categories.iter().map(|c| c.budget).sum();
        let total_spent: Money = expenses.iter().map(|e| e.amount).sum();
        let spending_percentage = if total_budget.is_zero() {
            0.0
        } else {
            (total_spent.cents() as f64 / total_budget.cents() as f64) * 100.0
        };

        Self {
            total_budget,
            total_spent,
            total_remaining: total_budget - total_spent,
            spending_percentage,
            by_category,
        }
    }
}

/// The most recent expenses, in insertion order (the store prepends, so no
/// date sort is applied)
pub fn recent_expenses(expenses: &[Expense], count: usize) -> &[Expense] {
    &expenses[..expenses.len().min(count)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryDraft, ExpenseDraft};
    use chrono::NaiveDate;

    fn category(name: &str, budget_cents: i64) -> Category {
        Category::new(CategoryDraft {
            name: name.to_string(),
            icon: "ShoppingCart".to_string(),
            color: "emerald".to_string(),
            budget: Money::from_cents(budget_cents),
        })
    }

    fn expense(category_id: CategoryId, cents: i64, description: &str) -> Expense {
        Expense::new(ExpenseDraft {
            description: description.to_string(),
            amount: Money::from_cents(cents),
            category_id,
            date: NaiveDate::from_ymd_opt(2024, 7, 28).unwrap(),
        })
    }

    #[test]
    fn test_spent_and_remaining() {
        // Budget 100.00, one expense of 40.00: spent 40.00, remaining 60.00
        let c1 = category("Groceries", 10000);
        let expenses = vec![expense(c1.id, 4000, "groceries")];

        let summary = DashboardSummary::generate(&[c1], &expenses);
        assert_eq!(summary.by_category.len(), 1);
        assert_eq!(summary.by_category[0].spent, Money::from_cents(4000));
        assert_eq!(summary.by_category[0].remaining, Money::from_cents(6000));
        assert_eq!(summary.total_budget, Money::from_cents(10000));
        assert_eq!(summary.total_spent, Money::from_cents(4000));
        assert_eq!(summary.total_remaining, Money::from_cents(6000));
        assert!((summary.spending_percentage - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_expenses_attribute_to_their_category_only() {
        let c1 = category("Groceries", 10000);
        let c2 = category("Transport", 5000);
        let expenses = vec![
            expense(c1.id, 3000, "food"),
            expense(c2.id, 1000, "bus"),
            expense(c1.id, 500, "snacks"),
        ];

        let summary = DashboardSummary::generate(&[c1.clone(), c2.clone()], &expenses);
        assert_eq!(summary.by_category[0].spent, Money::from_cents(3500));
        assert_eq!(summary.by_category[1].spent, Money::from_cents(1000));
    }

    #[test]
    fn test_over_budget_goes_negative() {
        let c1 = category("Dining Out", 2000);
        let expenses = vec![expense(c1.id, 6780, "dinner with friends")];

        let summary = DashboardSummary::generate(&[c1], &expenses);
        assert_eq!(summary.by_category[0].remaining, Money::from_cents(-4780));
        assert!(summary.by_category[0].remaining.is_negative());
    }

    #[test]
    fn test_zero_budget_percentage() {
        let summary = DashboardSummary::generate(&[], &[]);
        assert_eq!(summary.spending_percentage, 0.0);
        assert!(summary.by_category.is_empty());
    }

    #[test]
    fn test_recent_expenses_slice() {
        let c1 = category("Groceries", 10000);
        let expenses: Vec<Expense> = (0..8)
            .map(|i| expense(c1.id, 100 * i, &format!("expense {}", i)))
            .collect();

        let recent = recent_expenses(&expenses, RECENT_EXPENSE_COUNT);
        assert_eq!(recent.len(), 5);
        // Insertion order, no sorting
        assert_eq!(recent[0].description, "expense 0");

        let short = recent_expenses(&expenses[..2], RECENT_EXPENSE_COUNT);
        assert_eq!(short.len(), 2);
    }
}
