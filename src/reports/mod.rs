//! Aggregate views over store state
//!
//! Reports are purely derivative; they never mutate the store.

pub mod dashboard;

pub use dashboard::{recent_expenses, CategorySpending, DashboardSummary, RECENT_EXPENSE_COUNT};
