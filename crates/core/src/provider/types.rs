//! Provider traits and error taxonomy.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::resolver::{Candidate, ResolutionRequest};

/// What kind of backend a provider fronts.
///
/// The distinction matters once for season packs: usenet payloads can be
/// split into per-episode candidates, torrent payloads cannot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Usenet,
    Torrent,
}

/// Errors a provider query can surface.
///
/// Either variant aborts the whole resolution pass - an authentication
/// failure needs operator attention, and a transient failure is not retried
/// by the engine.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("authentication rejected: {0}")]
    Authentication(String),

    #[error("search failed: {0}")]
    Failed(String),
}

/// One search backend.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Provider name for logging and failure-history keys.
    fn name(&self) -> &str;

    /// Backend kind (usenet | torrent).
    fn kind(&self) -> ProviderKind;

    /// Whether the provider is currently enabled. Inactive providers are
    /// skipped without being queried.
    fn is_active(&self) -> bool {
        true
    }

    /// Execute a search for the requested episode set.
    ///
    /// Must fully complete (candidates, empty, or error) before returning;
    /// the engine never merges two providers' result sets concurrently.
    async fn search(&self, request: &ResolutionRequest) -> Result<Vec<Candidate>, ProviderError>;
}

/// Errors from splitting a season payload.
#[derive(Debug, Error)]
pub enum SplitError {
    #[error("payload retrieval failed: {0}")]
    Retrieval(String),

    #[error("payload is not a season pack: {0}")]
    NotASeasonPack(String),
}

/// Splits a usenet season pack into per-episode candidates.
///
/// Only meaningful for usenet payloads; torrent season packs are taken as a
/// single multi-episode candidate instead.
#[async_trait]
pub trait SeasonSplitter: Send + Sync {
    async fn split(&self, season: &Candidate) -> Result<Vec<Candidate>, SplitError>;
}
