//! Spreadsheet import service
//!
//! Reads a CSV export into raw row arrays, ships them to the extraction
//! flow, validates the model's output, and batch-adds the surviving
//! expenses to the store. Column detection, amount cleanup, and category
//! mapping are all delegated to the hosted model; this module only moves
//! data and enforces the schema at the boundary.

use std::path::Path;

use csv::ReaderBuilder;

use crate::ai::{extract_expenses, validate_response, ExtractExpensesRequest, GeminiClient};
use crate::error::{BudgetError, BudgetResult};
use crate::store::DomainStore;

/// Upper bound on rows shipped to the model, to keep prompts bounded
pub const MAX_IMPORT_ROWS: usize = 500;

/// Outcome of an import run
#[derive(Debug, Default)]
pub struct ImportSummary {
    /// Expenses added to the store
    pub imported: usize,
    /// Reasons for entries the model returned but validation rejected
    pub rejected: Vec<String>,
    /// Rows dropped because the file exceeded [`MAX_IMPORT_ROWS`]
    pub truncated_rows: usize,
}

/// Read a CSV file into raw row arrays
///
/// No header interpretation happens here; the model receives the rows
/// verbatim (including any header row) and works out the columns itself.
pub fn read_rows(path: &Path) -> BudgetResult<Vec<Vec<String>>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| BudgetError::Import(format!("Failed to open {}: {}", path.display(), e)))?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|e| BudgetError::Import(format!("Failed to read CSV row: {}", e)))?;
        rows.push(record.iter().map(|field| field.to_string()).collect());
    }

    if rows.is_empty() {
        return Err(BudgetError::Import(format!(
            "{} contains no rows",
            path.display()
        )));
    }

    Ok(rows)
}

/// Import a CSV file: extract via the hosted model, validate, batch-add
pub fn import_csv(
    store: &mut DomainStore,
    client: &GeminiClient,
    path: &Path,
) -> BudgetResult<ImportSummary> {
    let mut rows = read_rows(path)?;

    let truncated_rows = rows.len().saturating_sub(MAX_IMPORT_ROWS);
    if truncated_rows > 0 {
        tracing::warn!(
            dropped = truncated_rows,
            limit = MAX_IMPORT_ROWS,
            "import file too large, trailing rows dropped"
        );
        rows.truncate(MAX_IMPORT_ROWS);
    }

    let request = ExtractExpensesRequest::new(&rows, store.categories(), store.currency())?;
    let response = extract_expenses(client, &request)?;
    let validated = validate_response(response, store.categories());

    for reason in &validated.rejected {
        tracing::warn!(%reason, "extracted expense rejected");
    }

    let imported = validated.accepted.len();
    for draft in validated.accepted {
        store.add_expense(draft);
    }

    Ok(ImportSummary {
        imported,
        rejected: validated.rejected,
        truncated_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_csv(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_read_rows_keeps_header_and_data() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "export.csv",
            "Date,Description,Amount\n07/28/2024,Weekly groceries,$85.60\n07/27/2024,Gasoline,45.00\n",
        );

        let rows = read_rows(&path).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["Date", "Description", "Amount"]);
        assert_eq!(rows[1][1], "Weekly groceries");
    }

    #[test]
    fn test_read_rows_flexible_widths() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "ragged.csv", "a,b,c\nd,e\nf,g,h,i\n");

        let rows = read_rows(&path).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].len(), 2);
        assert_eq!(rows[2].len(), 4);
    }

    #[test]
    fn test_read_rows_empty_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "empty.csv", "");

        let err = read_rows(&path).unwrap_err();
        assert!(matches!(err, BudgetError::Import(_)));
    }

    #[test]
    fn test_read_rows_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let err = read_rows(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, BudgetError::Import(_)));
    }
}
