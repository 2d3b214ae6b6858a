//! Content provider abstraction.
//!
//! A [`Provider`] wraps one search backend (a usenet indexer or a torrent
//! tracker). The engine queries providers one at a time, in priority order;
//! each query fully completes before its candidates are evaluated. Retry
//! policy, deadlines and scraping details all live inside implementations.

mod types;

pub use types::{Provider, ProviderError, ProviderKind, SeasonSplitter, SplitError};
