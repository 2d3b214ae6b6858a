//! Failure history for previously-snatched releases.
//!
//! Releases that failed to download are remembered by
//! `(normalized name, size, provider)` so the engine can refuse to pick them
//! again. Lookups are read-only and safe for concurrent passes; writes come
//! from the download backend after the fact.

mod sqlite;
mod types;

pub use sqlite::SqliteFailureHistory;
pub use types::{normalize_release_name, FailureHistory, HistoryError};
