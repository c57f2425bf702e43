//! Category model
//!
//! A category is a budget bucket with a monthly limit. Icon and color are
//! presentation hints carried for the view layer; the core never interprets
//! them.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;
use super::money::Money;

/// A budget category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier, assigned at creation
    pub id: CategoryId,

    /// Display label, non-empty
    pub name: String,

    /// Icon hint, opaque to the core
    pub icon: String,

    /// Color hint, opaque to the core
    pub color: String,

    /// Monthly budget limit
    pub budget: Money,
}

/// Payload for creating a category; the store assigns the id
#[derive(Debug, Clone)]
pub struct CategoryDraft {
    pub name: String,
    pub icon: String,
    pub color: String,
    pub budget: Money,
}

impl Category {
    /// Create a new category with a fresh id
    pub fn new(draft: CategoryDraft) -> Self {
        Self {
            id: CategoryId::new(),
            name: draft.name,
            icon: draft.icon,
            color: draft.color,
            budget: draft.budget,
        }
    }

    /// Validate the category
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.len() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.len()));
        }

        if self.budget.is_negative() {
            return Err(CategoryValidationError::NegativeBudget);
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The built-in category set seeded on first run and after a data reset
pub fn default_categories() -> Vec<Category> {
    let seed = [
        ("Groceries", "ShoppingCart", "emerald", 40000),
        ("Transportation", "Bus", "blue", 15000),
        ("Entertainment", "Film", "purple", 20000),
        ("Dining Out", "Utensils", "orange", 25000),
        ("Utilities", "Lightbulb", "yellow", 18000),
        ("Health", "HeartPulse", "red", 10000),
    ];

    seed.into_iter()
        .map(|(name, icon, color, cents)| {
            Category::new(CategoryDraft {
                name: name.to_string(),
                icon: icon.to_string(),
                color: color.to_string(),
                budget: Money::from_cents(cents),
            })
        })
        .collect()
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    NegativeBudget,
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
            Self::NegativeBudget => write!(f, "Budget cannot be negative"),
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, budget: i64) -> CategoryDraft {
        CategoryDraft {
            name: name.to_string(),
            icon: "ShoppingCart".to_string(),
            color: "emerald".to_string(),
            budget: Money::from_cents(budget),
        }
    }

    #[test]
    fn test_new_category() {
        let category = Category::new(draft("Groceries", 40000));
        assert_eq!(category.name, "Groceries");
        assert_eq!(category.budget, Money::from_cents(40000));
    }

    #[test]
    fn test_validation() {
        let mut category = Category::new(draft("Valid", 1000));
        assert!(category.validate().is_ok());

        category.name = String::new();
        assert_eq!(category.validate(), Err(CategoryValidationError::EmptyName));

        category.name = "a".repeat(51);
        assert!(matches!(
            category.validate(),
            Err(CategoryValidationError::NameTooLong(_))
        ));

        category.name = "Valid".to_string();
        category.budget = Money::from_cents(-100);
        assert_eq!(
            category.validate(),
            Err(CategoryValidationError::NegativeBudget)
        );
    }

    #[test]
    fn test_default_categories() {
        let defaults = default_categories();
        assert_eq!(defaults.len(), 6);
        assert_eq!(defaults[0].name, "Groceries");
        assert_eq!(defaults[0].budget, Money::from_cents(40000));

        // Freshly generated ids are unique
        let mut ids: Vec<_> = defaults.iter().map(|c| c.id).collect();
        ids.sort_by_key(|id| *id.as_uuid());
        ids.dedup();
        assert_eq!(ids.len(), 6);
    }

    #[test]
    fn test_serialization() {
        let category = Category::new(draft("Utilities", 18000));
        let json = serde_json::to_string(&category).unwrap();
        let deserialized: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(category, deserialized);
    }
}
