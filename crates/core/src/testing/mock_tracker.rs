//! Mock episode tracker for testing.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::quality::Quality;
use crate::show::EpisodeTracker;

/// Mock implementation of [`EpisodeTracker`].
///
/// Episodes are wanted by default; tests mark individual episodes unwanted
/// with [`set_wanted`](MockEpisodeTracker::set_wanted). Season contents are
/// configured per (show, season).
pub struct MockEpisodeTracker {
    wanted: Mutex<HashMap<(String, u32, u32), bool>>,
    seasons: Mutex<HashMap<(String, u32), Vec<u32>>>,
}

impl Default for MockEpisodeTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEpisodeTracker {
    pub fn new() -> Self {
        Self {
            wanted: Mutex::new(HashMap::new()),
            seasons: Mutex::new(HashMap::new()),
        }
    }

    /// Configure the episode numbers a season contains.
    pub fn set_season(&self, show_id: &str, season: u32, episodes: Vec<u32>) {
        self.seasons
            .lock()
            .unwrap()
            .insert((show_id.to_string(), season), episodes);
    }

    /// Override the wanted flag for one episode (default: wanted).
    pub fn set_wanted(&self, show_id: &str, season: u32, number: u32, wanted: bool) {
        self.wanted
            .lock()
            .unwrap()
            .insert((show_id.to_string(), season, number), wanted);
    }
}

impl EpisodeTracker for MockEpisodeTracker {
    fn wants_episode(&self, show_id: &str, season: u32, number: u32, _quality: Quality) -> bool {
        self.wanted
            .lock()
            .unwrap()
            .get(&(show_id.to_string(), season, number))
            .copied()
            .unwrap_or(true)
    }

    fn season_episodes(&self, show_id: &str, season: u32) -> Vec<u32> {
        self.seasons
            .lock()
            .unwrap()
            .get(&(show_id.to_string(), season))
            .cloned()
            .unwrap_or_default()
    }
}
