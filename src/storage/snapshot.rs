//! Durable state snapshot and its JSON file adapter
//!
//! The whole application state persists as a single document:
//! `{ expenses, categories, currency }`. Every save is an idempotent
//! whole-state overwrite with last-writer-wins semantics; there is no
//! locking and no cross-save transaction.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::BudgetResult;
use crate::models::{default_categories, Category, Expense};

use super::file_io::{read_json, remove_if_exists, write_json_atomic};

/// Default currency code used on first run and after a reset
pub const DEFAULT_CURRENCY: &str = "USD";

/// The persisted application state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub expenses: Vec<Expense>,
    pub categories: Vec<Category>,
    pub currency: String,
}

impl Snapshot {
    /// The built-in starting state: default categories, no expenses
    pub fn seed() -> Self {
        Self {
            expenses: Vec::new(),
            categories: default_categories(),
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

/// Persistence contract for the domain store
///
/// `load` never fails: any read problem is logged and reported as "not
/// found", which the store treats as a first run. Saves may fail; the
/// caller decides what to do (the store routes them through its outbox).
pub trait SnapshotStore {
    /// Return the last-persisted snapshot, or `None` when there is none
    fn load(&self) -> Option<Snapshot>;

    /// Overwrite durable state with the given snapshot
    fn save(&self, snapshot: &Snapshot) -> BudgetResult<()>;

    /// Remove durable state entirely
    fn clear(&self) -> BudgetResult<()>;
}

/// Snapshot store backed by a single JSON file, written atomically
pub struct JsonSnapshotStore {
    path: PathBuf,
}

impl JsonSnapshotStore {
    /// Create a store persisting to the given file path
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The backing file path
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl SnapshotStore for JsonSnapshotStore {
    fn load(&self) -> Option<Snapshot> {
        match read_json(&self.path) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                // An unreadable snapshot degrades to a first run rather than
                // blocking startup.
                tracing::warn!(%err, path = %self.path.display(), "failed to load snapshot");
                None
            }
        }
    }

    fn save(&self, snapshot: &Snapshot) -> BudgetResult<()> {
        write_json_atomic(&self.path, snapshot)
    }

    fn clear(&self) -> BudgetResult<()> {
        remove_if_exists(&self.path)
    }
}
