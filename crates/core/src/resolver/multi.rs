//! Multi-episode reconciliation.
//!
//! Decides which multi-episode candidates are still worth keeping once the
//! round's single-episode coverage is known. An accepted multi claims its
//! episodes: their single-candidate lists are removed, and later multis
//! covering only claimed episodes are dropped.

use std::collections::BTreeSet;

use tracing::debug;

use crate::history::FailureHistory;

use super::filter::previously_failed;
use super::types::Candidate;
use super::working_set::WorkingSet;

/// Scan the round's multi-episode bucket in input order, returning the
/// accepted candidates.
pub fn reconcile_multis(
    working: &mut WorkingSet,
    history: Option<&dyn FailureHistory>,
) -> Vec<Candidate> {
    let mut accepted: Vec<Candidate> = Vec::new();
    let mut claimed: BTreeSet<u32> = BTreeSet::new();

    for multi in working.take_multis() {
        debug!(name = %multi.name, "seeing if we want to bother with multi-episode result");

        if previously_failed(history, &multi) {
            continue;
        }

        let numbers = multi.episode_numbers();

        let needed: Vec<u32> = numbers
            .iter()
            .copied()
            .filter(|n| !working.has_singles_for(*n))
            .collect();
        if needed.is_empty() {
            debug!(
                name = %multi.name,
                "all episodes covered by single results, ignoring the multi"
            );
            continue;
        }

        let unclaimed: Vec<u32> = numbers
            .iter()
            .copied()
            .filter(|n| !claimed.contains(n))
            .collect();
        if unclaimed.is_empty() {
            debug!(
                name = %multi.name,
                "all episodes covered by another multi-episode result, ignoring"
            );
            continue;
        }

        // Keeping it: the multi now owns its episodes, singles for them are
        // no longer needed.
        for &number in &numbers {
            claimed.insert(number);
            working.remove_singles(number);
        }
        accepted.push(multi);
    }

    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::SqliteFailureHistory;
    use crate::quality::Quality;
    use crate::testing::fixtures;

    #[test]
    fn test_multi_superseded_by_singles_dropped() {
        let mut working = WorkingSet::new();
        working.add(fixtures::single_candidate(
            "Test.Show.S01E01.720p.HDTV",
            Quality::Hdtv,
            1,
        ));
        working.add(fixtures::single_candidate(
            "Test.Show.S01E02.720p.HDTV",
            Quality::Hdtv,
            2,
        ));
        working.add(fixtures::multi_candidate(
            "Test.Show.S01E01E02.720p.HDTV",
            Quality::Hdtv,
            &[1, 2],
        ));

        let accepted = reconcile_multis(&mut working, None);
        assert!(accepted.is_empty());
        // The singles stay
        assert!(working.has_singles_for(1));
        assert!(working.has_singles_for(2));
    }

    #[test]
    fn test_accepted_multi_removes_overlapping_singles() {
        let mut working = WorkingSet::new();
        working.add(fixtures::single_candidate(
            "Test.Show.S01E01.720p.HDTV",
            Quality::Hdtv,
            1,
        ));
        working.add(fixtures::multi_candidate(
            "Test.Show.S01E01E02.720p.HDTV",
            Quality::Hdtv,
            &[1, 2],
        ));

        let accepted = reconcile_multis(&mut working, None);
        assert_eq!(accepted.len(), 1);
        assert!(!working.has_singles_for(1));
    }

    #[test]
    fn test_multi_superseded_by_earlier_multi_dropped() {
        let mut working = WorkingSet::new();
        working.add(fixtures::multi_candidate(
            "Test.Show.S01E01E02E03.720p.HDTV",
            Quality::Hdtv,
            &[1, 2, 3],
        ));
        working.add(fixtures::multi_candidate(
            "Test.Show.S01E02E03.720p.HDTV",
            Quality::Hdtv,
            &[2, 3],
        ));

        let accepted = reconcile_multis(&mut working, None);
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].episode_numbers(), vec![1, 2, 3]);
    }

    #[test]
    fn test_partially_overlapping_multis_both_accepted() {
        let mut working = WorkingSet::new();
        working.add(fixtures::multi_candidate(
            "Test.Show.S01E01E02.720p.HDTV",
            Quality::Hdtv,
            &[1, 2],
        ));
        working.add(fixtures::multi_candidate(
            "Test.Show.S01E02E03.720p.HDTV",
            Quality::Hdtv,
            &[2, 3],
        ));

        let accepted = reconcile_multis(&mut working, None);
        assert_eq!(accepted.len(), 2);
    }

    #[test]
    fn test_failed_multi_dropped() {
        let history = SqliteFailureHistory::in_memory().unwrap();
        let multi = fixtures::multi_candidate(
            "Test.Show.S01E01E02.720p.HDTV",
            Quality::Hdtv,
            &[1, 2],
        );
        history
            .record_failure(&multi.name, multi.size_bytes, &multi.provider_id)
            .unwrap();

        let mut working = WorkingSet::new();
        working.add(multi);

        let accepted = reconcile_multis(&mut working, Some(&history));
        assert!(accepted.is_empty());
    }

    #[test]
    fn test_multi_needed_for_uncovered_episode_accepted() {
        let mut working = WorkingSet::new();
        working.add(fixtures::single_candidate(
            "Test.Show.S01E01.720p.HDTV",
            Quality::Hdtv,
            1,
        ));
        // Episode 2 has no single coverage
        working.add(fixtures::multi_candidate(
            "Test.Show.S01E01E02.720p.HDTV",
            Quality::Hdtv,
            &[1, 2],
        ));

        let accepted = reconcile_multis(&mut working, None);
        assert_eq!(accepted.len(), 1);
        // The now-redundant single for episode 1 is gone
        assert!(!working.has_singles_for(1));
    }
}
