//! Testing utilities and mock implementations of the engine's collaborator
//! traits, used by the crate-level integration tests.

mod mock_provider;
mod mock_splitter;
mod mock_tracker;

pub use mock_provider::MockProvider;
pub use mock_splitter::MockSeasonSplitter;
pub use mock_tracker::MockEpisodeTracker;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::provider::ProviderKind;
    use crate::quality::Quality;
    use crate::resolver::{Candidate, CandidateKind};
    use crate::show::EpisodeRef;

    /// Show id used by every fixture candidate.
    pub const SHOW_ID: &str = "show-1";
    /// Show title matching [`SHOW_ID`]; fixture release names should start
    /// with it so `StandardReleaseChecks::matches_show` passes.
    pub const SHOW_TITLE: &str = "Test Show";

    fn candidate(
        name: &str,
        quality: Quality,
        episodes: &[u32],
        kind: CandidateKind,
    ) -> Candidate {
        Candidate {
            provider_id: "mock-usenet".to_string(),
            provider_kind: ProviderKind::Usenet,
            name: name.to_string(),
            quality,
            size_bytes: 700 * 1024 * 1024,
            episodes: episodes
                .iter()
                .map(|&n| EpisodeRef::new(SHOW_ID, 1, n))
                .collect(),
            locator: format!("http://mock/{}", name),
            kind,
        }
    }

    /// A single-episode candidate for season 1 of the fixture show.
    pub fn single_candidate(name: &str, quality: Quality, episode: u32) -> Candidate {
        candidate(name, quality, &[episode], CandidateKind::Single)
    }

    /// A multi-episode candidate for season 1 of the fixture show.
    pub fn multi_candidate(name: &str, quality: Quality, episodes: &[u32]) -> Candidate {
        candidate(name, quality, episodes, CandidateKind::Multi)
    }

    /// A season-pack candidate for season 1 of the fixture show.
    pub fn season_candidate(name: &str, quality: Quality, episodes: &[u32]) -> Candidate {
        candidate(name, quality, episodes, CandidateKind::Season)
    }
}
