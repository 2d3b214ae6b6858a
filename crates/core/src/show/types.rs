//! Show, episode and policy types.

use serde::{Deserialize, Serialize};

use crate::quality::{Quality, QualityPreference};

/// Identity of a show as the engine sees it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShowRef {
    /// Stable identifier from the show database.
    pub id: String,
    /// Display title, used for release-name matching.
    pub title: String,
}

impl ShowRef {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// Identifies one episode of a show. Identity only - wanted-status and
/// current quality live behind [`EpisodeTracker`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EpisodeRef {
    pub show_id: String,
    pub season: u32,
    pub number: u32,
}

impl EpisodeRef {
    pub fn new(show_id: impl Into<String>, season: u32, number: u32) -> Self {
        Self {
            show_id: show_id.into(),
            season,
            number,
        }
    }
}

/// Per-show filter and preference configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShowPolicy {
    /// Comma-separated words; a candidate whose name matches any of them
    /// (whole-word, case-insensitive) is rejected.
    #[serde(default)]
    pub ignore_words: String,
    /// Comma-separated words; when non-empty, a candidate is rejected unless
    /// its name matches at least one of them.
    #[serde(default)]
    pub require_words: String,
    /// Prefer per-episode releases over a whole season pack even when the
    /// pack would cover every wanted episode.
    #[serde(default)]
    pub prefer_single_episodes: bool,
    /// Archive the episode as soon as the first upgrade-tier match is
    /// snatched, instead of waiting for further upgrades.
    #[serde(default)]
    pub archive_on_first_match: bool,
    /// The two-tier quality preference.
    #[serde(default)]
    pub preference: QualityPreference,
}

/// Read-only view of episode state, consulted during resolution.
///
/// Implementations are expected to be cheap lookups (the engine calls
/// `wants_episode` once per expected episode when weighing a season pack)
/// and safe for concurrent reads.
pub trait EpisodeTracker: Send + Sync {
    /// Whether the episode is still wanted at the given quality.
    fn wants_episode(&self, show_id: &str, season: u32, number: u32, quality: Quality) -> bool;

    /// Every episode number the season is expected to contain.
    fn season_episodes(&self, show_id: &str, season: u32) -> Vec<u32>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_episode_ref_ordering() {
        let a = EpisodeRef::new("show", 1, 2);
        let b = EpisodeRef::new("show", 1, 10);
        assert!(a < b);
    }

    #[test]
    fn test_show_policy_defaults() {
        let policy: ShowPolicy = serde_json::from_str("{}").unwrap();
        assert!(policy.ignore_words.is_empty());
        assert!(policy.require_words.is_empty());
        assert!(!policy.prefer_single_episodes);
        assert!(!policy.archive_on_first_match);
        assert!(policy.preference.acceptable.is_empty());
    }

    #[test]
    fn test_episode_ref_serialization() {
        let ep = EpisodeRef::new("tt123", 2, 5);
        let json = serde_json::to_string(&ep).unwrap();
        let parsed: EpisodeRef = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ep);
    }
}
