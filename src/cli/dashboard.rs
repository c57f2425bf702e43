//! Dashboard CLI command

use crate::display::format_dashboard;
use crate::error::BudgetResult;
use crate::reports::{recent_expenses, DashboardSummary, RECENT_EXPENSE_COUNT};
use crate::store::DomainStore;

pub fn handle_dashboard(store: &DomainStore) -> BudgetResult<()> {
    let summary = DashboardSummary::generate(store.categories(), store.expenses());
    let recent = recent_expenses(store.expenses(), RECENT_EXPENSE_COUNT);

    println!(
        "{}",
        format_dashboard(&summary, recent, store.categories(), store.currency())
    );

    Ok(())
}
