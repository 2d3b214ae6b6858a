//! Mock season splitter for testing.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::provider::{SeasonSplitter, SplitError};
use crate::resolver::Candidate;

/// Mock implementation of [`SeasonSplitter`].
pub struct MockSeasonSplitter {
    parts: Mutex<Vec<Candidate>>,
    next_error: Mutex<Option<SplitError>>,
    calls: Mutex<usize>,
}

impl Default for MockSeasonSplitter {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSeasonSplitter {
    pub fn new() -> Self {
        Self {
            parts: Mutex::new(Vec::new()),
            next_error: Mutex::new(None),
            calls: Mutex::new(0),
        }
    }

    /// Set the candidates returned by subsequent splits.
    pub fn set_parts(&self, parts: Vec<Candidate>) {
        *self.parts.lock().unwrap() = parts;
    }

    /// Configure the next split to fail with the given error.
    pub fn set_next_error(&self, error: SplitError) {
        *self.next_error.lock().unwrap() = Some(error);
    }

    /// Number of splits performed.
    pub fn call_count(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl SeasonSplitter for MockSeasonSplitter {
    async fn split(&self, _season: &Candidate) -> Result<Vec<Candidate>, SplitError> {
        *self.calls.lock().unwrap() += 1;
        if let Some(err) = self.next_error.lock().unwrap().take() {
            return Err(err);
        }
        Ok(self.parts.lock().unwrap().clone())
    }
}
