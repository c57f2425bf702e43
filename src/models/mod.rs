//! Core data models for BudgetWise
//!
//! Contains the domain entities (categories, expenses), the strongly-typed
//! ID wrappers, and the Money type used throughout.

pub mod category;
pub mod expense;
pub mod ids;
pub mod money;

pub use category::{default_categories, Category, CategoryDraft, CategoryValidationError};
pub use expense::{Expense, ExpenseDraft, ExpenseValidationError};
pub use ids::{CategoryId, ExpenseId};
pub use money::{Money, MoneyParseError};
