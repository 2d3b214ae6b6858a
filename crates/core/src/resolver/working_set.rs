//! Per-provider-round working collection of candidates.

use std::collections::{BTreeMap, BTreeSet};

use crate::quality::{best_of, Quality};

use super::types::{Candidate, CandidateKind};

/// Candidates of one provider round, bucketed by granularity.
///
/// Single-episode candidates are keyed by episode number so the selection
/// loop walks them in deterministic order. Adding never overwrites: a second
/// candidate for an episode appends to that episode's list.
#[derive(Debug, Default)]
pub struct WorkingSet {
    singles: BTreeMap<u32, Vec<Candidate>>,
    multis: Vec<Candidate>,
    season_packs: Vec<Candidate>,
}

impl WorkingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a candidate to the right bucket.
    ///
    /// Season-kind candidates go to the season bucket; everything else is
    /// bucketed by episode count, so re-filtered split results land where
    /// their actual coverage says regardless of what the splitter labeled
    /// them.
    pub fn add(&mut self, candidate: Candidate) {
        if candidate.kind == CandidateKind::Season {
            self.add_season(candidate);
        } else if candidate.episodes.len() == 1 {
            self.add_single(candidate);
        } else {
            self.add_multi(candidate);
        }
    }

    pub fn add_single(&mut self, candidate: Candidate) {
        let number = candidate.episodes[0].number;
        self.singles.entry(number).or_default().push(candidate);
    }

    pub fn add_multi(&mut self, candidate: Candidate) {
        self.multis.push(candidate);
    }

    pub fn add_season(&mut self, candidate: Candidate) {
        self.season_packs.push(candidate);
    }

    /// Single-episode candidates, keyed by episode number.
    pub fn singles(&self) -> &BTreeMap<u32, Vec<Candidate>> {
        &self.singles
    }

    /// Episodes with at least one single-episode candidate.
    pub fn covered_episodes(&self) -> BTreeSet<u32> {
        self.singles
            .iter()
            .filter(|(_, list)| !list.is_empty())
            .map(|(number, _)| *number)
            .collect()
    }

    /// Whether `episode` has a non-empty single-candidate list.
    pub fn has_singles_for(&self, episode: u32) -> bool {
        self.singles
            .get(&episode)
            .is_some_and(|list| !list.is_empty())
    }

    /// Drop the single-candidate list for `episode`.
    pub fn remove_singles(&mut self, episode: u32) {
        self.singles.remove(&episode);
    }

    /// Drain the multi-episode bucket, preserving insertion order.
    pub fn take_multis(&mut self) -> Vec<Candidate> {
        std::mem::take(&mut self.multis)
    }

    /// Drain the season bucket.
    pub fn take_season_packs(&mut self) -> Vec<Candidate> {
        std::mem::take(&mut self.season_packs)
    }

    /// Highest quality across every bucket, excluding `Unknown`.
    pub fn highest_overall(&self) -> Option<Quality> {
        let qualities = self
            .singles
            .values()
            .flatten()
            .chain(&self.multis)
            .chain(&self.season_packs)
            .map(|c| c.quality);
        best_of(qualities)
    }

    pub fn is_empty(&self) -> bool {
        self.singles.values().all(|list| list.is_empty())
            && self.multis.is_empty()
            && self.season_packs.is_empty()
    }
}
