//! Season pack reconciliation.
//!
//! A season-granularity candidate is either adopted whole (it covers every
//! still-wanted episode and nothing in the round beats its quality),
//! discarded (nothing in the season is wanted at its quality), or exploded
//! into per-episode coverage and merged back into the working set.

use tracing::{debug, info, warn};

use crate::history::FailureHistory;
use crate::metrics;
use crate::naming::ReleaseNameCheck;
use crate::provider::{ProviderKind, SeasonSplitter};
use crate::quality::Quality;
use crate::show::{EpisodeRef, EpisodeTracker};

use super::filter::{filter_candidates, FilterContext};
use super::types::{Candidate, CandidateKind, ResolutionRequest};
use super::working_set::WorkingSet;

/// What became of a season pack.
#[derive(Debug)]
pub enum SeasonDisposition {
    /// Taken whole; the pass is over for this request. Carries the pack
    /// expanded to every expected episode.
    Adopted(Candidate),
    /// Nothing in the season is wanted at this quality.
    Discarded,
    /// Broken up; its coverage now lives in the working set.
    Exploded,
}

impl SeasonDisposition {
    fn label(&self) -> &'static str {
        match self {
            SeasonDisposition::Adopted(_) => "adopted",
            SeasonDisposition::Discarded => "discarded",
            SeasonDisposition::Exploded => "exploded",
        }
    }
}

/// Collaborators needed to weigh a season pack.
pub struct SeasonContext<'a> {
    pub request: &'a ResolutionRequest,
    pub tracker: &'a dyn EpisodeTracker,
    pub splitter: &'a dyn SeasonSplitter,
    pub naming: &'a dyn ReleaseNameCheck,
    pub history: Option<&'a dyn FailureHistory>,
}

/// Decide the disposition of the round's best season pack.
///
/// `highest_overall` is the best non-`Unknown` quality seen anywhere in the
/// round, season packs included.
pub async fn reconcile_season(
    season_best: Candidate,
    highest_overall: Option<Quality>,
    working: &mut WorkingSet,
    ctx: &SeasonContext<'_>,
) -> SeasonDisposition {
    let show = &ctx.request.show;
    let season = ctx.request.season;

    debug!(
        name = %season_best.name,
        quality = season_best.quality.as_label(),
        "weighing season pack"
    );

    let expected = ctx.tracker.season_episodes(&show.id, season);

    let mut all_wanted = !expected.is_empty();
    let mut any_wanted = false;
    for &number in &expected {
        if ctx
            .tracker
            .wants_episode(&show.id, season, number, season_best.quality)
        {
            any_wanted = true;
        } else {
            all_wanted = false;
        }
    }

    let disposition = if all_wanted
        && Some(season_best.quality) == highest_overall
        && !ctx.request.policy.prefer_single_episodes
    {
        info!(
            name = %season_best.name,
            "every episode in the season is needed, taking the whole pack"
        );
        let episodes: Vec<EpisodeRef> = expected
            .iter()
            .map(|&number| EpisodeRef::new(show.id.clone(), season, number))
            .collect();
        SeasonDisposition::Adopted(Candidate {
            episodes,
            kind: CandidateKind::Season,
            ..season_best
        })
    } else if !any_wanted {
        debug!(
            name = %season_best.name,
            "no episode in the season is wanted at this quality, ignoring the pack"
        );
        SeasonDisposition::Discarded
    } else {
        explode(season_best, &expected, working, ctx).await;
        SeasonDisposition::Exploded
    };

    metrics::SEASON_PACKS
        .with_label_values(&[disposition.label()])
        .inc();
    disposition
}

/// Break a partially-wanted pack into the working set.
async fn explode(
    season_best: Candidate,
    expected: &[u32],
    working: &mut WorkingSet,
    ctx: &SeasonContext<'_>,
) {
    match season_best.provider_kind {
        ProviderKind::Usenet => {
            debug!(
                name = %season_best.name,
                "breaking the pack apart into individual episode candidates"
            );
            let parts = match ctx.splitter.split(&season_best).await {
                Ok(parts) => parts,
                Err(e) => {
                    // The pack is unusable; the round continues without it.
                    warn!(name = %season_best.name, error = %e, "season split failed");
                    return;
                }
            };
            let filter_ctx = FilterContext {
                show: &ctx.request.show,
                policy: &ctx.request.policy,
                naming: ctx.naming,
                history: ctx.history,
            };
            for part in filter_candidates(parts, &filter_ctx) {
                working.add(part);
            }
        }
        ProviderKind::Torrent => {
            // A torrent pack cannot be split; leech it as one multi-episode
            // candidate covering the full season.
            info!(
                name = %season_best.name,
                "adding multi-episode candidate for the full-season torrent"
            );
            let episodes: Vec<EpisodeRef> = expected
                .iter()
                .map(|&number| EpisodeRef::new(ctx.request.show.id.clone(), ctx.request.season, number))
                .collect();
            working.add_multi(Candidate {
                episodes,
                kind: CandidateKind::Multi,
                ..season_best
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::StandardReleaseChecks;
    use crate::quality::QualityPreference;
    use crate::show::{ShowPolicy, ShowRef};
    use crate::testing::{fixtures, MockEpisodeTracker, MockSeasonSplitter};

    fn request(prefer_singles: bool) -> ResolutionRequest {
        ResolutionRequest {
            show: ShowRef::new(fixtures::SHOW_ID, fixtures::SHOW_TITLE),
            season: 1,
            episodes: vec![1, 2, 3],
            season_search: true,
            manual_search: false,
            policy: ShowPolicy {
                prefer_single_episodes: prefer_singles,
                preference: QualityPreference::new(
                    [Quality::Hdtv],
                    [Quality::Bluray1080],
                ),
                ..Default::default()
            },
        }
    }

    fn tracker_with_season() -> MockEpisodeTracker {
        let tracker = MockEpisodeTracker::new();
        tracker.set_season(fixtures::SHOW_ID, 1, vec![1, 2, 3]);
        tracker
    }

    #[tokio::test]
    async fn test_all_wanted_adopts_whole_pack() {
        let tracker = tracker_with_season();
        let splitter = MockSeasonSplitter::new();
        let checks = StandardReleaseChecks::new();
        let request = request(false);
        let ctx = SeasonContext {
            request: &request,
            tracker: &tracker,
            splitter: &splitter,
            naming: &checks,
            history: None,
        };

        let pack = fixtures::season_candidate("Test.Show.S01.720p.HDTV", Quality::Hdtv, &[1, 2, 3]);
        let mut working = WorkingSet::new();
        let disposition =
            reconcile_season(pack, Some(Quality::Hdtv), &mut working, &ctx).await;

        match disposition {
            SeasonDisposition::Adopted(adopted) => {
                assert_eq!(adopted.episode_numbers(), vec![1, 2, 3]);
            }
            other => panic!("expected adoption, got {:?}", other),
        }
        assert_eq!(splitter.call_count(), 0);
    }

    #[tokio::test]
    async fn test_prefer_singles_blocks_adoption() {
        let tracker = tracker_with_season();
        let splitter = MockSeasonSplitter::new();
        splitter.set_parts(vec![
            fixtures::single_candidate("Test.Show.S01E01.720p.HDTV", Quality::Hdtv, 1),
            fixtures::single_candidate("Test.Show.S01E02.720p.HDTV", Quality::Hdtv, 2),
        ]);
        let checks = StandardReleaseChecks::new();
        let request = request(true);
        let ctx = SeasonContext {
            request: &request,
            tracker: &tracker,
            splitter: &splitter,
            naming: &checks,
            history: None,
        };

        let pack = fixtures::season_candidate("Test.Show.S01.720p.HDTV", Quality::Hdtv, &[1, 2, 3]);
        let mut working = WorkingSet::new();
        let disposition =
            reconcile_season(pack, Some(Quality::Hdtv), &mut working, &ctx).await;

        assert!(matches!(disposition, SeasonDisposition::Exploded));
        assert_eq!(splitter.call_count(), 1);
        assert!(working.has_singles_for(1));
        assert!(working.has_singles_for(2));
    }

    #[tokio::test]
    async fn test_nothing_wanted_discards_pack() {
        let tracker = tracker_with_season();
        for number in [1, 2, 3] {
            tracker.set_wanted(fixtures::SHOW_ID, 1, number, false);
        }
        let splitter = MockSeasonSplitter::new();
        let checks = StandardReleaseChecks::new();
        let request = request(false);
        let ctx = SeasonContext {
            request: &request,
            tracker: &tracker,
            splitter: &splitter,
            naming: &checks,
            history: None,
        };

        let pack = fixtures::season_candidate("Test.Show.S01.720p.HDTV", Quality::Hdtv, &[1, 2, 3]);
        let mut working = WorkingSet::new();
        let disposition =
            reconcile_season(pack, Some(Quality::Hdtv), &mut working, &ctx).await;

        assert!(matches!(disposition, SeasonDisposition::Discarded));
        assert!(working.is_empty());
    }

    #[tokio::test]
    async fn test_partial_interest_explodes_usenet_pack() {
        let tracker = tracker_with_season();
        tracker.set_wanted(fixtures::SHOW_ID, 1, 1, false);
        let splitter = MockSeasonSplitter::new();
        splitter.set_parts(vec![
            fixtures::single_candidate("Test.Show.S01E02.720p.HDTV", Quality::Hdtv, 2),
            fixtures::single_candidate("Test.Show.S01E03.720p.HDTV", Quality::Hdtv, 3),
            // Junk parts are filtered out on the way in
            fixtures::single_candidate("Test.Show.S01E03.720p.SAMPLE", Quality::Hdtv, 3),
        ]);
        let checks = StandardReleaseChecks::new();
        let request = request(false);
        let ctx = SeasonContext {
            request: &request,
            tracker: &tracker,
            splitter: &splitter,
            naming: &checks,
            history: None,
        };

        let pack = fixtures::season_candidate("Test.Show.S01.720p.HDTV", Quality::Hdtv, &[1, 2, 3]);
        let mut working = WorkingSet::new();
        let disposition =
            reconcile_season(pack, Some(Quality::Hdtv), &mut working, &ctx).await;

        assert!(matches!(disposition, SeasonDisposition::Exploded));
        assert!(!working.has_singles_for(1));
        assert!(working.has_singles_for(2));
        assert_eq!(working.singles()[&3].len(), 1);
    }

    #[tokio::test]
    async fn test_torrent_pack_becomes_multi() {
        let tracker = tracker_with_season();
        tracker.set_wanted(fixtures::SHOW_ID, 1, 1, false);
        let splitter = MockSeasonSplitter::new();
        let checks = StandardReleaseChecks::new();
        let request = request(false);
        let ctx = SeasonContext {
            request: &request,
            tracker: &tracker,
            splitter: &splitter,
            naming: &checks,
            history: None,
        };

        let mut pack =
            fixtures::season_candidate("Test.Show.S01.720p.HDTV", Quality::Hdtv, &[1, 2, 3]);
        pack.provider_kind = ProviderKind::Torrent;
        let mut working = WorkingSet::new();
        let disposition =
            reconcile_season(pack, Some(Quality::Hdtv), &mut working, &ctx).await;

        assert!(matches!(disposition, SeasonDisposition::Exploded));
        assert_eq!(splitter.call_count(), 0);
        let multis = working.take_multis();
        assert_eq!(multis.len(), 1);
        assert_eq!(multis[0].episode_numbers(), vec![1, 2, 3]);
        assert_eq!(multis[0].kind, CandidateKind::Multi);
    }

    #[tokio::test]
    async fn test_better_single_blocks_adoption() {
        // A 1080p single elsewhere in the round outranks the 720p pack.
        let tracker = tracker_with_season();
        let splitter = MockSeasonSplitter::new();
        let checks = StandardReleaseChecks::new();
        let request = request(false);
        let ctx = SeasonContext {
            request: &request,
            tracker: &tracker,
            splitter: &splitter,
            naming: &checks,
            history: None,
        };

        let pack = fixtures::season_candidate("Test.Show.S01.720p.HDTV", Quality::Hdtv, &[1, 2, 3]);
        let mut working = WorkingSet::new();
        let disposition =
            reconcile_season(pack, Some(Quality::Bluray1080), &mut working, &ctx).await;

        assert!(matches!(disposition, SeasonDisposition::Exploded));
    }
}
