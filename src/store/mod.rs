//! Domain store: the canonical in-memory holder of application state
//!
//! Owns the category and expense collections plus the currency code, and is
//! the only component allowed to mutate them. Every mutation applies to
//! in-memory state synchronously, then mirrors the full snapshot to the
//! injected [`SnapshotStore`] through a [`SaveOutbox`]. Persistence is
//! best-effort: a failed write is logged and retried later, never rolled
//! back into memory.
//!
//! The store is a plain owned value; single-writer discipline comes from
//! `&mut self` rather than interior locking.

pub mod outbox;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{Category, CategoryDraft, CategoryId, Expense, ExpenseDraft, ExpenseId};
use crate::storage::{Snapshot, SnapshotStore};

pub use outbox::SaveOutbox;

/// Canonical application state plus its persistence plumbing
pub struct DomainStore {
    expenses: Vec<Expense>,
    categories: Vec<Category>,
    currency: String,
    is_loading: bool,
    persistence: Box<dyn SnapshotStore>,
    outbox: SaveOutbox,
}

impl DomainStore {
    /// Create a store over the given persistence backend
    ///
    /// State starts from the built-in seed; call [`hydrate`](Self::hydrate)
    /// to replace it with persisted state.
    pub fn new(persistence: Box<dyn SnapshotStore>) -> Self {
        let seed = Snapshot::seed();
        Self {
            expenses: seed.expenses,
            categories: seed.categories,
            currency: seed.currency,
            is_loading: true,
            persistence,
            outbox: SaveOutbox::default(),
        }
    }

    /// Load persisted state, seeding defaults when none exists
    ///
    /// The loading flag clears when this returns, regardless of outcome.
    pub fn hydrate(&mut self) {
        self.is_loading = true;
        match self.persistence.load() {
            Some(snapshot) => {
                self.expenses = snapshot.expenses;
                self.categories = snapshot.categories;
                self.currency = snapshot.currency;
            }
            None => {
                let seed = Snapshot::seed();
                self.expenses = seed.expenses;
                self.categories = seed.categories;
                self.currency = seed.currency;
            }
        }
        self.is_loading = false;
    }

    // === Read accessors ===

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Look up a category by id
    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Look up an expense by id
    pub fn expense(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|e| e.id == id)
    }

    /// Find a category by name (case-insensitive), full id, or short id
    pub fn find_category(&self, identifier: &str) -> Option<&Category> {
        let lowered = identifier.to_lowercase();
        self.categories.iter().find(|c| {
            c.name.to_lowercase() == lowered
                || c.id.to_string() == identifier
                || c.id.short() == identifier
        })
    }

    /// Find an expense by full id or short id
    pub fn find_expense(&self, identifier: &str) -> Option<&Expense> {
        self.expenses
            .iter()
            .find(|e| e.id.to_string() == identifier || e.id.short() == identifier)
    }

    /// Current state as a persistable snapshot
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            expenses: self.expenses.clone(),
            categories: self.categories.clone(),
            currency: self.currency.clone(),
        }
    }

    // === Expense operations ===

    /// Record a new expense, newest first
    pub fn add_expense(&mut self, draft: ExpenseDraft) -> ExpenseId {
        let expense = Expense::new(draft);
        let id = expense.id;
        self.expenses.insert(0, expense);
        self.mirror();
        id
    }

    /// Replace the expense matching `expense.id`
    pub fn edit_expense(&mut self, expense: Expense) -> BudgetResult<()> {
        let slot = self
            .expenses
            .iter_mut()
            .find(|e| e.id == expense.id)
            .ok_or_else(|| BudgetError::expense_not_found(expense.id.short()))?;
        *slot = expense;
        self.mirror();
        Ok(())
    }

    /// Remove the expense with the given id
    pub fn delete_expense(&mut self, id: ExpenseId) -> BudgetResult<()> {
        let before = self.expenses.len();
        self.expenses.retain(|e| e.id != id);
        if self.expenses.len() == before {
            return Err(BudgetError::expense_not_found(id.short()));
        }
        self.mirror();
        Ok(())
    }

    // === Category operations ===

    /// Create a new category, appended to the collection
    pub fn add_category(&mut self, draft: CategoryDraft) -> CategoryId {
        let category = Category::new(draft);
        let id = category.id;
        self.categories.push(category);
        self.mirror();
        id
    }

    /// Replace the category matching `category.id`
    pub fn edit_category(&mut self, category: Category) -> BudgetResult<()> {
        let slot = self
            .categories
            .iter_mut()
            .find(|c| c.id == category.id)
            .ok_or_else(|| BudgetError::category_not_found(category.id.short()))?;
        *slot = category;
        self.mirror();
        Ok(())
    }

    /// Remove a category and cascade-delete every expense referencing it
    pub fn delete_category(&mut self, id: CategoryId) -> BudgetResult<()> {
        let before = self.categories.len();
        self.categories.retain(|c| c.id != id);
        if self.categories.len() == before {
            return Err(BudgetError::category_not_found(id.short()));
        }
        self.expenses.retain(|e| e.category_id != id);
        self.mirror();
        Ok(())
    }

    /// Replace the entire category collection
    ///
    /// A full overwrite, not a merge: categories omitted from the input are
    /// dropped. Expenses are left untouched.
    pub fn update_budgets(&mut self, categories: Vec<Category>) {
        self.categories = categories;
        self.mirror();
    }

    // === Currency and reset ===

    /// Replace the process-wide currency code
    pub fn set_currency(&mut self, currency: impl Into<String>) {
        self.currency = currency.into();
        self.mirror();
    }

    /// Clear durable state and restore the built-in defaults
    pub fn reset_data(&mut self) {
        // A pending save racing the reset must not resurrect cleared data
        self.outbox.discard();

        if let Err(err) = self.persistence.clear() {
            tracing::warn!(%err, "failed to clear persisted data during reset");
        }

        let seed = Snapshot::seed();
        self.expenses = seed.expenses;
        self.categories = seed.categories;
        self.currency = seed.currency;
    }

    /// Retry any unsaved snapshot
    pub fn flush_pending(&mut self) -> bool {
        self.outbox.flush(&*self.persistence)
    }

    /// Whether a mutation is still waiting to reach durable storage
    pub fn has_unsaved_changes(&self) -> bool {
        self.outbox.has_pending()
    }

    /// Mirror the current state to durable storage, best-effort
    fn mirror(&mut self) {
        self.outbox.push(self.snapshot());
        self.outbox.flush(&*self.persistence);
    }
}
