//! Spending insights flow
//!
//! Packages the user's spending data and budgets as JSON strings, asks the
//! hosted model for trends and suggestions, and validates the two-field
//! structured response.

use serde::{Deserialize, Serialize};

use crate::error::BudgetResult;
use crate::models::{Category, Expense};

use super::gateway::GeminiClient;

/// Input to the insights flow
#[derive(Debug, Clone)]
pub struct SpendingInsightsRequest {
    /// JSON string of the user's expenses
    pub spending_data: String,
    /// JSON string of the current monthly budget per category
    pub current_budget: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WireExpense<'a> {
    description: &'a str,
    amount: f64,
    category_id: String,
    date: String,
}

#[derive(Serialize)]
struct BudgetLine<'a> {
    category: &'a str,
    budget: f64,
}

impl SpendingInsightsRequest {
    /// Assemble a request from store state
    pub fn from_state(expenses: &[Expense], categories: &[Category]) -> BudgetResult<Self> {
        let wire_expenses: Vec<WireExpense> = expenses
            .iter()
            .map(|e| WireExpense {
                description: &e.description,
                amount: e.amount.to_major_units(),
                category_id: e.category_id.to_string(),
                date: e.date.format("%Y-%m-%d").to_string(),
            })
            .collect();

        let budget_lines: Vec<BudgetLine> = categories
            .iter()
            .map(|c| BudgetLine {
                category: &c.name,
                budget: c.budget.to_major_units(),
            })
            .collect();

        Ok(Self {
            spending_data: serde_json::to_string(&wire_expenses)?,
            current_budget: serde_json::to_string(&budget_lines)?,
        })
    }
}

/// The model's structured insights response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingInsights {
    /// Summary of identified spending trends
    pub spending_trends: String,
    /// Personalized budget adjustment suggestions
    pub budget_suggestions: String,
}

/// Build the insights prompt
pub fn build_prompt(request: &SpendingInsightsRequest) -> String {
    format!(
        "You are a personal finance advisor. Analyze the user's spending data \
         and provide personalized insights and budget adjustment suggestions.\n\
         \n\
         Spending Data: {spending_data}\n\
         Current Budget: {current_budget}\n\
         \n\
         Identify spending trends, including any unexpected charges or areas \
         where the user is overspending. Suggest realistic budget adjustments \
         based on these trends and the user's current budget goals.\n\
         \n\
         Respond with JSON of the shape {{\"spendingTrends\": string, \
         \"budgetSuggestions\": string}}, written so the user can easily \
         understand it.",
        spending_data = request.spending_data,
        current_budget = request.current_budget,
    )
}

/// Run the insights flow against the hosted model
pub fn spending_insights(
    client: &GeminiClient,
    request: &SpendingInsightsRequest,
) -> BudgetResult<SpendingInsights> {
    client.generate_json(&build_prompt(request))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{default_categories, ExpenseDraft, Money};
    use chrono::NaiveDate;

    #[test]
    fn test_request_from_state() {
        let categories = default_categories();
        let expense = Expense::new(ExpenseDraft {
            description: "Dinner with friends".to_string(),
            amount: Money::from_cents(6780),
            category_id: categories[3].id,
            date: NaiveDate::from_ymd_opt(2024, 7, 25).unwrap(),
        });

        let request = SpendingInsightsRequest::from_state(&[expense], &categories).unwrap();
        assert!(request.spending_data.contains("Dinner with friends"));
        assert!(request.spending_data.contains("67.8"));
        assert!(request.spending_data.contains("2024-07-25"));
        assert!(request.current_budget.contains("\"category\":\"Dining Out\""));
        assert!(request.current_budget.contains("250.0"));
    }

    #[test]
    fn test_prompt_carries_data() {
        let request = SpendingInsightsRequest {
            spending_data: "[{\"description\":\"Lunch\"}]".to_string(),
            current_budget: "[{\"category\":\"Dining Out\",\"budget\":250}]".to_string(),
        };
        let prompt = build_prompt(&request);
        assert!(prompt.contains("Lunch"));
        assert!(prompt.contains("Dining Out"));
        assert!(prompt.contains("spendingTrends"));
    }

    #[test]
    fn test_response_deserializes_camel_case() {
        let body = r#"{
            "spendingTrends": "Dining out is trending up.",
            "budgetSuggestions": "Shift 50 from Entertainment to Dining Out."
        }"#;
        let insights: SpendingInsights = serde_json::from_str(body).unwrap();
        assert!(insights.spending_trends.contains("Dining out"));
        assert!(insights.budget_suggestions.contains("Entertainment"));
    }
}
