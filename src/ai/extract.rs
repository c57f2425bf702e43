//! Expense extraction flow
//!
//! Sends spreadsheet rows to the hosted model and validates the structured
//! output it returns. The wire contract is camelCase JSON with f64 amounts
//! and `yyyy-MM-dd` date strings; everything is converted to domain types
//! at this boundary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{BudgetError, BudgetResult};
use crate::models::{Category, CategoryId, ExpenseDraft, Money};

use super::gateway::GeminiClient;

/// Input to the extraction flow
#[derive(Debug, Clone)]
pub struct ExtractExpensesRequest {
    /// JSON string representation of the spreadsheet data, an array of
    /// row arrays
    pub file_content: String,
    /// JSON string of available categories as `{id, name}` pairs
    pub categories: String,
    /// Currency code for the amounts
    pub currency: String,
}

#[derive(Serialize)]
struct CategoryRef<'a> {
    id: &'a CategoryId,
    name: &'a str,
}

impl ExtractExpensesRequest {
    /// Assemble a request from raw rows and the current category set
    pub fn new(rows: &[Vec<String>], categories: &[Category], currency: &str) -> BudgetResult<Self> {
        let refs: Vec<CategoryRef> = categories
            .iter()
            .map(|c| CategoryRef {
                id: &c.id,
                name: &c.name,
            })
            .collect();

        Ok(Self {
            file_content: serde_json::to_string(rows)?,
            categories: serde_json::to_string(&refs)?,
            currency: currency.to_string(),
        })
    }
}

/// One expense as returned by the model
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedExpense {
    pub description: String,
    pub amount: f64,
    pub category_id: String,
    pub date: String,
}

/// The model's structured output
#[derive(Debug, Deserialize)]
pub struct ExtractExpensesResponse {
    pub expenses: Vec<ExtractedExpense>,
}

/// Result of validating the model output against the domain
#[derive(Debug, Default)]
pub struct ValidatedExtraction {
    pub accepted: Vec<ExpenseDraft>,
    /// Human-readable reasons for each rejected entry
    pub rejected: Vec<String>,
}

/// Build the extraction prompt
///
/// `today` anchors relative dates ("yesterday") the spreadsheet may contain.
pub fn build_prompt(request: &ExtractExpensesRequest, today: NaiveDate) -> String {
    format!(
        "You are an expert at parsing and categorizing financial data from \
         spreadsheets. Your task is to extract transaction details from the \
         provided JSON data and format them according to the specified schema.\n\
         \n\
         Today's date is {today}. Use this for interpreting relative dates \
         like \"yesterday\" or \"today\".\n\
         \n\
         Here are the available spending categories:\n\
         {categories}\n\
         \n\
         Amounts are in {currency}.\n\
         \n\
         Analyze the following spreadsheet data:\n\
         {file_content}\n\
         \n\
         Please perform the following actions:\n\
         1. Identify the header row to determine the columns for date, \
         description, amount, and category. These might not be in a \
         consistent order.\n\
         2. Iterate through each data row to extract the relevant information.\n\
         3. For each transaction, map the provided category text to the most \
         appropriate category ID from the list above. If a direct match isn't \
         found, use your best judgment. If no reasonable category can be \
         determined, assign a sensible default.\n\
         4. Clean up the data: amounts may have currency symbols or be \
         strings; convert them to numbers. Dates can be in various formats; \
         standardize them to 'yyyy-MM-dd'.\n\
         5. Respond with JSON of the shape \
         {{\"expenses\": [{{\"description\": string, \"amount\": number, \
         \"categoryId\": string, \"date\": \"yyyy-MM-dd\"}}]}}.",
        today = today.format("%Y-%m-%d"),
        categories = request.categories,
        currency = request.currency,
        file_content = request.file_content,
    )
}

/// Run the extraction flow against the hosted model
pub fn extract_expenses(
    client: &GeminiClient,
    request: &ExtractExpensesRequest,
) -> BudgetResult<ExtractExpensesResponse> {
    let today = chrono::Local::now().date_naive();
    client.generate_json(&build_prompt(request, today))
}

/// Validate model output against the offered categories
///
/// Entries with an unknown category id, an unparseable date, or a bad
/// amount are rejected individually; the rest pass through as drafts.
pub fn validate_response(
    response: ExtractExpensesResponse,
    categories: &[Category],
) -> ValidatedExtraction {
    let mut result = ValidatedExtraction::default();

    for (index, entry) in response.expenses.into_iter().enumerate() {
        match validate_entry(&entry, categories) {
            Ok(draft) => result.accepted.push(draft),
            Err(reason) => result
                .rejected
                .push(format!("entry {}: {}", index + 1, reason)),
        }
    }

    result
}

fn validate_entry(entry: &ExtractedExpense, categories: &[Category]) -> Result<ExpenseDraft, String> {
    if entry.description.trim().is_empty() {
        return Err("empty description".to_string());
    }

    let category_id: CategoryId = entry
        .category_id
        .parse()
        .map_err(|_| format!("invalid category id '{}'", entry.category_id))?;
    if !categories.iter().any(|c| c.id == category_id) {
        return Err(format!("unknown category id '{}'", entry.category_id));
    }

    let date = NaiveDate::parse_from_str(&entry.date, "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{}'", entry.date))?;

    let amount = Money::from_major_units(entry.amount)
        .ok_or_else(|| format!("invalid amount {}", entry.amount))?;
    if amount.is_negative() {
        return Err(format!("negative amount {}", entry.amount));
    }

    Ok(ExpenseDraft {
        description: entry.description.clone(),
        amount,
        category_id,
        date,
    })
}
