//! Expense model
//!
//! A single transaction assigned to a category. Insertion order is
//! meaningful: the store prepends new expenses, so "recent" views read from
//! the front without sorting by date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{CategoryId, ExpenseId};
use super::money::Money;

/// A recorded expense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Unique identifier, assigned at creation
    pub id: ExpenseId,

    /// Free-text description
    pub description: String,

    /// Amount spent; expected non-negative, enforced at the input edges only
    pub amount: Money,

    /// The category this expense belongs to. No referential check at write
    /// time; category deletion cascades instead.
    pub category_id: CategoryId,

    /// Calendar date of the expense
    pub date: NaiveDate,
}

/// Payload for creating an expense; the store assigns the id
#[derive(Debug, Clone)]
pub struct ExpenseDraft {
    pub description: String,
    pub amount: Money,
    pub category_id: CategoryId,
    pub date: NaiveDate,
}

impl Expense {
    /// Create a new expense with a fresh id
    pub fn new(draft: ExpenseDraft) -> Self {
        Self {
            id: ExpenseId::new(),
            description: draft.description,
            amount: draft.amount,
            category_id: draft.category_id,
            date: draft.date,
        }
    }

    /// Validate the expense
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.description.trim().is_empty() {
            return Err(ExpenseValidationError::EmptyDescription);
        }

        if self.amount.is_negative() {
            return Err(ExpenseValidationError::NegativeAmount);
        }

        Ok(())
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.description, self.amount)
    }
}

/// Validation errors for expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpenseValidationError {
    EmptyDescription,
    NegativeAmount,
}

impl fmt::Display for ExpenseValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Expense description cannot be empty"),
            Self::NegativeAmount => write!(f, "Expense amount cannot be negative"),
        }
    }
}

impl std::error::Error for ExpenseValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(description: &str, cents: i64) -> ExpenseDraft {
        ExpenseDraft {
            description: description.to_string(),
            amount: Money::from_cents(cents),
            category_id: CategoryId::new(),
            date: NaiveDate::from_ymd_opt(2024, 7, 28).unwrap(),
        }
    }

    #[test]
    fn test_new_expense() {
        let expense = Expense::new(draft("Weekly groceries", 8560));
        assert_eq!(expense.description, "Weekly groceries");
        assert_eq!(expense.amount, Money::from_cents(8560));
    }

    #[test]
    fn test_validation() {
        let mut expense = Expense::new(draft("Gasoline", 4500));
        assert!(expense.validate().is_ok());

        expense.description = "  ".to_string();
        assert_eq!(
            expense.validate(),
            Err(ExpenseValidationError::EmptyDescription)
        );

        expense.description = "Gasoline".to_string();
        expense.amount = Money::from_cents(-1);
        assert_eq!(
            expense.validate(),
            Err(ExpenseValidationError::NegativeAmount)
        );
    }

    #[test]
    fn test_date_serializes_as_iso() {
        let expense = Expense::new(draft("Movie tickets", 3250));
        let json = serde_json::to_string(&expense).unwrap();
        assert!(json.contains("\"2024-07-28\""));

        let deserialized: Expense = serde_json::from_str(&json).unwrap();
        assert_eq!(expense, deserialized);
    }
}
