//! Failure-history trait and helpers.

use thiserror::Error;

/// Errors from a failure-history backend.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("Database error: {0}")]
    Database(String),
}

/// Normalize a release name for history matching.
///
/// Strips a trailing `.nzb`/`.torrent` extension and collapses every run of
/// non-word characters into a single dot, so the same release matches
/// whether it was seen as `Show Name S01E01` or `Show.Name.S01E01.nzb`.
pub fn normalize_release_name(name: &str) -> String {
    let name = name
        .strip_suffix(".nzb")
        .or_else(|| name.strip_suffix(".torrent"))
        .unwrap_or(name);

    let mut out = String::with_capacity(name.len());
    let mut in_separator = false;
    for c in name.chars() {
        if c.is_alphanumeric() {
            out.push(c.to_ascii_lowercase());
            in_separator = false;
        } else if !in_separator && !out.is_empty() {
            out.push('.');
            in_separator = true;
        }
    }
    if out.ends_with('.') {
        out.pop();
    }
    out
}

/// Record of failed (and snatched) releases.
pub trait FailureHistory: Send + Sync {
    /// Whether this exact `(name, size, provider)` triple failed before.
    fn has_failed(&self, name: &str, size_bytes: u64, provider_id: &str)
        -> Result<bool, HistoryError>;

    /// Record a failed download.
    fn record_failure(
        &self,
        name: &str,
        size_bytes: u64,
        provider_id: &str,
    ) -> Result<(), HistoryError>;

    /// Record a snatch, so a later failure report can be tied back to the
    /// provider it came from.
    fn record_snatch(
        &self,
        name: &str,
        size_bytes: u64,
        provider_id: &str,
    ) -> Result<(), HistoryError>;
}
