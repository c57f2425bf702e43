//! AI gateway: stateless request/response wrappers around a hosted model
//!
//! Two flows, mirroring the application's wire contracts: expense
//! extraction from spreadsheet rows and spending insights. The gateway
//! validates the model's structured output against the domain; it
//! implements no extraction or advice logic itself.

pub mod extract;
pub mod gateway;
pub mod insights;

pub use extract::{
    extract_expenses, validate_response, ExtractExpensesRequest, ExtractExpensesResponse,
    ExtractedExpense, ValidatedExtraction,
};
pub use gateway::{GeminiClient, API_KEY_ENV};
pub use insights::{spending_insights, SpendingInsights, SpendingInsightsRequest};
