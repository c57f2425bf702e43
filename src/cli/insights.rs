//! Insights CLI command

use crate::ai::{spending_insights, GeminiClient, SpendingInsightsRequest};
use crate::config::Settings;
use crate::error::{BudgetError, BudgetResult};
use crate::store::DomainStore;

pub fn handle_insights(store: &DomainStore, settings: &Settings) -> BudgetResult<()> {
    if store.expenses().is_empty() {
        return Err(BudgetError::Validation(
            "No spending data recorded yet; add some expenses first".into(),
        ));
    }

    let client = GeminiClient::from_env(&settings.gateway)?;
    let request = SpendingInsightsRequest::from_state(store.expenses(), store.categories())?;

    println!("Analyzing your spending...");
    let insights = spending_insights(&client, &request)?;

    println!("\nSpending trends\n---------------");
    println!("{}", insights.spending_trends);
    println!("\nBudget suggestions\n------------------");
    println!("{}", insights.budget_suggestions);

    Ok(())
}
