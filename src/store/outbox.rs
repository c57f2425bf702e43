//! Save outbox with a bounded retry policy
//!
//! Mutations never wait on durable storage: the store pushes the latest
//! snapshot here and the outbox attempts the write. On failure the snapshot
//! stays pending and the next flush retries it; a newer push replaces the
//! pending snapshot (newest wins). After too many consecutive failures the
//! snapshot is dropped with an error log so a dead disk cannot grow an
//! unbounded backlog.

use crate::storage::{Snapshot, SnapshotStore};

/// Default number of write attempts before a pending snapshot is dropped
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Pending-write slot between the domain store and its snapshot store
#[derive(Debug)]
pub struct SaveOutbox {
    pending: Option<Snapshot>,
    attempts: u32,
    max_attempts: u32,
}

impl SaveOutbox {
    /// Create an outbox with the given retry bound
    pub fn new(max_attempts: u32) -> Self {
        Self {
            pending: None,
            attempts: 0,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Replace the pending snapshot with a newer one
    ///
    /// A snapshot that failed to write is superseded rather than queued;
    /// durable state is whole-document overwrite, so only the newest
    /// version matters.
    pub fn push(&mut self, snapshot: Snapshot) {
        self.pending = Some(snapshot);
        self.attempts = 0;
    }

    /// Attempt to write the pending snapshot, if any
    ///
    /// Returns `true` when nothing remains pending afterwards. Failures are
    /// logged and swallowed; in-memory state is never rolled back.
    pub fn flush(&mut self, store: &dyn SnapshotStore) -> bool {
        let Some(snapshot) = self.pending.as_ref() else {
            return true;
        };

        match store.save(snapshot) {
            Ok(()) => {
                self.pending = None;
                self.attempts = 0;
                true
            }
            Err(err) => {
                self.attempts += 1;
                if self.attempts >= self.max_attempts {
                    tracing::error!(
                        %err,
                        attempts = self.attempts,
                        "dropping unsaved snapshot after repeated write failures"
                    );
                    self.pending = None;
                    self.attempts = 0;
                } else {
                    tracing::warn!(
                        %err,
                        attempt = self.attempts,
                        "snapshot write failed, will retry"
                    );
                }
                false
            }
        }
    }

    /// Discard any pending snapshot without writing it
    ///
    /// Used by reset so a stale pending save cannot resurrect cleared data.
    pub fn discard(&mut self) {
        self.pending = None;
        self.attempts = 0;
    }

    /// Whether an unsaved snapshot is waiting
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl Default for SaveOutbox {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BudgetError, BudgetResult};
    use std::cell::{Cell, RefCell};

    /// Snapshot store that fails the first `failures` saves
    struct FlakyStore {
        failures: Cell<u32>,
        saved: RefCell<Vec<Snapshot>>,
    }

    impl FlakyStore {
        fn failing(failures: u32) -> Self {
            Self {
                failures: Cell::new(failures),
                saved: RefCell::new(Vec::new()),
            }
        }
    }

    impl SnapshotStore for FlakyStore {
        fn load(&self) -> Option<Snapshot> {
            self.saved.borrow().last().cloned()
        }

        fn save(&self, snapshot: &Snapshot) -> BudgetResult<()> {
            let remaining = self.failures.get();
            if remaining > 0 {
                self.failures.set(remaining - 1);
                return Err(BudgetError::Storage("disk on fire".into()));
            }
            self.saved.borrow_mut().push(snapshot.clone());
            Ok(())
        }

        fn clear(&self) -> BudgetResult<()> {
            self.saved.borrow_mut().clear();
            Ok(())
        }
    }

    fn snapshot_with_currency(currency: &str) -> Snapshot {
        let mut snapshot = Snapshot::seed();
        snapshot.currency = currency.to_string();
        snapshot
    }

    #[test]
    fn test_flush_empty_is_noop() {
        let store = FlakyStore::failing(0);
        let mut outbox = SaveOutbox::default();
        assert!(outbox.flush(&store));
        assert!(store.saved.borrow().is_empty());
    }

    #[test]
    fn test_successful_flush_clears_pending() {
        let store = FlakyStore::failing(0);
        let mut outbox = SaveOutbox::default();

        outbox.push(Snapshot::seed());
        assert!(outbox.has_pending());
        assert!(outbox.flush(&store));
        assert!(!outbox.has_pending());
        assert_eq!(store.saved.borrow().len(), 1);
    }

    #[test]
    fn test_failed_flush_retries_on_next_call() {
        let store = FlakyStore::failing(1);
        let mut outbox = SaveOutbox::default();

        outbox.push(Snapshot::seed());
        assert!(!outbox.flush(&store));
        assert!(outbox.has_pending());

        // Second attempt succeeds
        assert!(outbox.flush(&store));
        assert_eq!(store.saved.borrow().len(), 1);
    }

    #[test]
    fn test_newest_snapshot_wins() {
        let store = FlakyStore::failing(1);
        let mut outbox = SaveOutbox::default();

        outbox.push(snapshot_with_currency("USD"));
        assert!(!outbox.flush(&store));

        // A newer snapshot supersedes the failed one
        outbox.push(snapshot_with_currency("EUR"));
        assert!(outbox.flush(&store));

        let saved = store.saved.borrow();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].currency, "EUR");
    }

    #[test]
    fn test_gives_up_after_max_attempts() {
        let store = FlakyStore::failing(u32::MAX);
        let mut outbox = SaveOutbox::new(3);

        outbox.push(Snapshot::seed());
        assert!(!outbox.flush(&store));
        assert!(!outbox.flush(&store));
        assert!(!outbox.flush(&store));

        // Dropped after the third failure
        assert!(!outbox.has_pending());
        assert!(outbox.flush(&store));
    }

    #[test]
    fn test_discard_drops_pending() {
        let store = FlakyStore::failing(1);
        let mut outbox = SaveOutbox::default();

        outbox.push(Snapshot::seed());
        assert!(!outbox.flush(&store));
        outbox.discard();

        assert!(!outbox.has_pending());
        assert!(outbox.flush(&store));
        assert!(store.saved.borrow().is_empty());
    }
}
