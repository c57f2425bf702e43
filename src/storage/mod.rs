//! Persistence layer for BudgetWise
//!
//! The durable form of the application is one JSON document holding
//! expenses, categories, and the currency code. The [`SnapshotStore`]
//! trait abstracts the backing store so the domain store can be tested
//! against in-memory fakes.

pub mod file_io;
pub mod snapshot;

pub use file_io::{read_json, write_json_atomic};
pub use snapshot::{JsonSnapshotStore, Snapshot, SnapshotStore, DEFAULT_CURRENCY};
