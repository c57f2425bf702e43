//! Import CLI command

use std::path::Path;

use crate::ai::GeminiClient;
use crate::config::Settings;
use crate::error::BudgetResult;
use crate::services::import_csv;
use crate::store::DomainStore;

pub fn handle_import(
    store: &mut DomainStore,
    settings: &Settings,
    file: &Path,
) -> BudgetResult<()> {
    let client = GeminiClient::from_env(&settings.gateway)?;

    println!("Importing from {}...", file.display());
    let summary = import_csv(store, &client, file)?;

    println!("Imported {} expense(s)", summary.imported);
    if summary.truncated_rows > 0 {
        println!(
            "Note: {} row(s) beyond the import limit were skipped",
            summary.truncated_rows
        );
    }
    for reason in &summary.rejected {
        println!("Skipped {}", reason);
    }

    Ok(())
}
