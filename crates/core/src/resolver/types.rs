//! Types for the resolution engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::provider::ProviderKind;
use crate::quality::Quality;
use crate::show::{EpisodeRef, ShowPolicy, ShowRef};

/// Granularity of a candidate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CandidateKind {
    /// Covers exactly one episode.
    Single,
    /// Covers more than one, but not a whole season.
    Multi,
    /// A full season pack.
    Season,
}

/// One provider's offering for an episode grouping.
///
/// Candidates are immutable once produced by a provider: the engine only
/// reads and reshapes collections of them. Splitting or expanding a season
/// pack produces new instances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Candidate {
    /// Provider that returned this candidate.
    pub provider_id: String,
    /// Backend kind of that provider.
    pub provider_kind: ProviderKind,
    /// Raw release title.
    pub name: String,
    /// Quality parsed from the release, `Unknown` when undetermined.
    pub quality: Quality,
    /// Payload size in bytes.
    pub size_bytes: u64,
    /// Episodes this candidate will satisfy.
    pub episodes: Vec<EpisodeRef>,
    /// Download locator (nzb URL, magnet URI, ...).
    pub locator: String,
    /// Granularity.
    pub kind: CandidateKind,
}

impl Candidate {
    /// Episode numbers covered by this candidate, in payload order.
    pub fn episode_numbers(&self) -> Vec<u32> {
        self.episodes.iter().map(|e| e.number).collect()
    }

    /// Show this candidate belongs to, from its first episode.
    pub fn show_id(&self) -> Option<&str> {
        self.episodes.first().map(|e| e.show_id.as_str())
    }

    /// Structural sanity: non-empty, duplicate-free, single-show episode
    /// list, with the episode count matching the declared kind.
    pub fn is_well_formed(&self) -> bool {
        let Some(first) = self.episodes.first() else {
            return false;
        };
        let mut seen = std::collections::BTreeSet::new();
        for ep in &self.episodes {
            if ep.show_id != first.show_id || !seen.insert((ep.season, ep.number)) {
                return false;
            }
        }
        match self.kind {
            CandidateKind::Single => self.episodes.len() == 1,
            CandidateKind::Multi => self.episodes.len() > 1,
            CandidateKind::Season => true,
        }
    }
}

/// A request to resolve one episode set of one show.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionRequest {
    pub show: ShowRef,
    pub season: u32,
    /// Episode numbers to resolve.
    pub episodes: Vec<u32>,
    /// Whether providers should search at season granularity too.
    pub season_search: bool,
    /// Whether this pass was triggered manually by the operator.
    pub manual_search: bool,
    /// Filter and preference configuration for the show.
    pub policy: ShowPolicy,
}

impl ResolutionRequest {
    /// Precondition contract on the episode set.
    pub fn validate(&self) -> Result<(), ResolveError> {
        if self.episodes.is_empty() {
            return Err(ResolveError::InvalidRequest(
                "episode set is empty".to_string(),
            ));
        }
        let mut seen = std::collections::BTreeSet::new();
        for &number in &self.episodes {
            if !seen.insert(number) {
                return Err(ResolveError::InvalidRequest(format!(
                    "duplicate episode {} in request",
                    number
                )));
            }
        }
        Ok(())
    }
}

/// Outcome of a successful resolution pass.
///
/// `results` is empty when nothing matched - that is a normal terminal
/// state, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resolution {
    /// Correlates log lines and metrics of one pass.
    pub pass_id: String,
    /// Chosen candidates, at most one per episode.
    pub results: Vec<Candidate>,
}

/// A resolution pass abort.
///
/// Either provider failure aborts the entire pass; remaining providers are
/// not tried. The engine performs no retries.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Provider credentials were rejected; needs operator attention.
    #[error("provider {provider} authentication failed: {message}")]
    Authentication { provider: String, message: String },

    /// Transient provider failure.
    #[error("provider {provider} failed: {message}")]
    Provider { provider: String, message: String },

    /// The request violated a precondition contract.
    #[error("invalid resolution request: {0}")]
    InvalidRequest(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(kind: CandidateKind, episodes: Vec<EpisodeRef>) -> Candidate {
        Candidate {
            provider_id: "test".to_string(),
            provider_kind: ProviderKind::Usenet,
            name: "Show.S01E01.720p".to_string(),
            quality: Quality::Hdtv,
            size_bytes: 1000,
            episodes,
            locator: "http://example/1".to_string(),
            kind,
        }
    }

    #[test]
    fn test_well_formed_single() {
        let c = candidate(CandidateKind::Single, vec![EpisodeRef::new("s", 1, 1)]);
        assert!(c.is_well_formed());
    }

    #[test]
    fn test_empty_episodes_rejected() {
        let c = candidate(CandidateKind::Single, vec![]);
        assert!(!c.is_well_formed());
    }

    #[test]
    fn test_duplicate_episodes_rejected() {
        let c = candidate(
            CandidateKind::Multi,
            vec![EpisodeRef::new("s", 1, 1), EpisodeRef::new("s", 1, 1)],
        );
        assert!(!c.is_well_formed());
    }

    #[test]
    fn test_mixed_show_rejected() {
        let c = candidate(
            CandidateKind::Multi,
            vec![EpisodeRef::new("a", 1, 1), EpisodeRef::new("b", 1, 2)],
        );
        assert!(!c.is_well_formed());
    }

    #[test]
    fn test_kind_count_mismatch_rejected() {
        let c = candidate(
            CandidateKind::Single,
            vec![EpisodeRef::new("s", 1, 1), EpisodeRef::new("s", 1, 2)],
        );
        assert!(!c.is_well_formed());
        let c = candidate(CandidateKind::Multi, vec![EpisodeRef::new("s", 1, 1)]);
        assert!(!c.is_well_formed());
    }

    #[test]
    fn test_request_validation() {
        let mut request = ResolutionRequest {
            show: ShowRef::new("s", "Show"),
            season: 1,
            episodes: vec![1, 2, 3],
            season_search: false,
            manual_search: false,
            policy: ShowPolicy::default(),
        };
        assert!(request.validate().is_ok());

        request.episodes = vec![];
        assert!(matches!(
            request.validate(),
            Err(ResolveError::InvalidRequest(_))
        ));

        request.episodes = vec![1, 2, 1];
        assert!(matches!(
            request.validate(),
            Err(ResolveError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_candidate_serialization() {
        let c = candidate(CandidateKind::Single, vec![EpisodeRef::new("s", 1, 1)]);
        let json = serde_json::to_string(&c).unwrap();
        let parsed: Candidate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.name, c.name);
        assert_eq!(parsed.quality, c.quality);
        assert_eq!(parsed.episodes, c.episodes);
    }
}
