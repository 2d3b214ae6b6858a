//! The resolution engine: per-provider loop, early stop, de-duplication.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, error, info};
use uuid::Uuid;

use crate::config::EngineConfig;
use crate::history::FailureHistory;
use crate::metrics;
use crate::naming::ReleaseNameCheck;
use crate::provider::{Provider, ProviderError, SeasonSplitter};
use crate::show::{EpisodeRef, EpisodeTracker};

use super::best::pick_best;
use super::filter::{filter_candidates, FilterContext};
use super::multi::reconcile_multis;
use super::season::{reconcile_season, SeasonContext, SeasonDisposition};
use super::types::{Candidate, Resolution, ResolutionRequest, ResolveError};
use super::working_set::WorkingSet;

/// Resolves a wanted episode set into the minimal, highest-quality,
/// non-overlapping set of candidates to acquire.
///
/// One `resolve` call is a single sequential pass: providers are queried in
/// the order given at construction, and state accumulated from provider *N*
/// influences decisions for provider *N+1*. Independent passes may run
/// concurrently; the engine holds no mutable state between calls.
pub struct ResolutionEngine {
    config: EngineConfig,
    providers: Vec<Arc<dyn Provider>>,
    tracker: Arc<dyn EpisodeTracker>,
    naming: Arc<dyn ReleaseNameCheck>,
    splitter: Arc<dyn SeasonSplitter>,
    history: Option<Arc<dyn FailureHistory>>,
}

impl ResolutionEngine {
    /// Create an engine. `providers` must already be in priority order.
    pub fn new(
        config: EngineConfig,
        providers: Vec<Arc<dyn Provider>>,
        tracker: Arc<dyn EpisodeTracker>,
        naming: Arc<dyn ReleaseNameCheck>,
        splitter: Arc<dyn SeasonSplitter>,
        history: Option<Arc<dyn FailureHistory>>,
    ) -> Self {
        Self {
            config,
            providers,
            tracker,
            naming,
            splitter,
            history,
        }
    }

    /// Failure history, only when tracking is enabled.
    fn history(&self) -> Option<&dyn FailureHistory> {
        if self.config.failure_tracking {
            self.history.as_deref()
        } else {
            None
        }
    }

    /// Run one resolution pass.
    ///
    /// Returns the chosen candidates (possibly empty - no match is a normal
    /// outcome), or an error when a provider fails; a provider failure
    /// aborts the whole pass without consulting the remaining providers.
    pub async fn resolve(&self, request: &ResolutionRequest) -> Result<Resolution, ResolveError> {
        request.validate()?;

        let pass_id = Uuid::new_v4().to_string();
        info!(
            %pass_id,
            show = %request.show.title,
            season = request.season,
            episodes = ?request.episodes,
            "starting resolution pass"
        );

        let mut final_results: Vec<Candidate> = Vec::new();
        let mut providers_queried = 0u32;

        for provider in self.providers.iter().filter(|p| p.is_active()) {
            providers_queried += 1;

            let candidates = match provider.search(request).await {
                Ok(candidates) => candidates,
                Err(ProviderError::Authentication(message)) => {
                    error!(%pass_id, provider = provider.name(), %message, "authentication error");
                    self.finish_pass("aborted", providers_queried);
                    return Err(ResolveError::Authentication {
                        provider: provider.name().to_string(),
                        message,
                    });
                }
                Err(ProviderError::Failed(message)) => {
                    error!(%pass_id, provider = provider.name(), %message, "error while searching");
                    self.finish_pass("aborted", providers_queried);
                    return Err(ResolveError::Provider {
                        provider: provider.name().to_string(),
                        message,
                    });
                }
            };

            if candidates.is_empty() {
                debug!(%pass_id, provider = provider.name(), "no results");
                continue;
            }

            let filter_ctx = FilterContext {
                show: &request.show,
                policy: &request.policy,
                naming: self.naming.as_ref(),
                history: self.history(),
            };
            let filtered = filter_candidates(candidates, &filter_ctx);
            if filtered.is_empty() {
                debug!(%pass_id, provider = provider.name(), "nothing survived filtering");
                continue;
            }

            let mut working = WorkingSet::new();
            for candidate in filtered {
                working.add(candidate);
            }

            // Season packs, including themselves, count toward the round's
            // quality ceiling.
            let highest_overall = working.highest_overall();
            debug!(
                %pass_id,
                highest = highest_overall.map(|q| q.as_label()).unwrap_or("none"),
                "highest quality of any match this round"
            );

            let season_packs = working.take_season_packs();
            let allowed = request.policy.preference.allowed();
            if let Some(season_best) = pick_best(
                &season_packs,
                &request.policy,
                Some(&allowed),
                self.history(),
            ) {
                let season_ctx = SeasonContext {
                    request,
                    tracker: self.tracker.as_ref(),
                    splitter: self.splitter.as_ref(),
                    naming: self.naming.as_ref(),
                    history: self.history(),
                };
                match reconcile_season(season_best, highest_overall, &mut working, &season_ctx)
                    .await
                {
                    SeasonDisposition::Adopted(adopted) => {
                        self.finish_pass("resolved", providers_queried);
                        metrics::RESULTS_RETURNED.observe(1.0);
                        return Ok(Resolution {
                            pass_id,
                            results: vec![adopted],
                        });
                    }
                    SeasonDisposition::Discarded | SeasonDisposition::Exploded => {}
                }
            }

            final_results.extend(reconcile_multis(&mut working, self.history()));

            // Narrow each remaining episode down to its best single.
            let (acceptable, _) = request.policy.preference.tiers();
            let best_upgrade = request.policy.preference.best_upgrade();
            for (number, list) in working.singles() {
                let Some(winner) = pick_best(list, &request.policy, None, self.history()) else {
                    continue;
                };

                let stop = best_upgrade == Some(winner.quality)
                    || acceptable.contains(&winner.quality);

                if stop {
                    info!(
                        %pass_id,
                        name = %winner.name,
                        quality = winner.quality.as_label(),
                        "found a good-enough match, stopping the search"
                    );
                    metrics::EARLY_STOPS.inc();
                    self.finish_pass("resolved", providers_queried);
                    metrics::RESULTS_RETURNED.observe(1.0);
                    return Ok(Resolution {
                        pass_id,
                        results: vec![winner],
                    });
                }

                debug!(%pass_id, episode = *number, name = %winner.name, "keeping best single");
                final_results.push(winner);
            }
        }

        let results = dedupe_results(final_results);
        let outcome = if results.is_empty() { "empty" } else { "resolved" };
        self.finish_pass(outcome, providers_queried);
        metrics::RESULTS_RETURNED.observe(results.len() as f64);
        info!(%pass_id, results = results.len(), "resolution pass finished");

        Ok(Resolution { pass_id, results })
    }

    fn finish_pass(&self, outcome: &str, providers_queried: u32) {
        metrics::RESOLUTION_PASSES
            .with_label_values(&[outcome])
            .inc();
        metrics::PROVIDERS_QUERIED.observe(providers_queried as f64);
    }
}

/// Cross-provider de-duplication: of results covering the same episode set,
/// only the highest quality survives. First-seen wins a quality tie.
fn dedupe_results(results: Vec<Candidate>) -> Vec<Candidate> {
    let mut kept: Vec<Candidate> = Vec::new();
    let mut by_coverage: HashMap<Vec<EpisodeRef>, usize> = HashMap::new();

    for candidate in results {
        let mut key = candidate.episodes.clone();
        key.sort();
        match by_coverage.get(&key) {
            Some(&index) => {
                if candidate.quality > kept[index].quality {
                    debug!(
                        name = %candidate.name,
                        replaced = %kept[index].name,
                        "replacing duplicate-coverage result with higher quality"
                    );
                    kept[index] = candidate;
                }
            }
            None => {
                by_coverage.insert(key, kept.len());
                kept.push(candidate);
            }
        }
    }

    kept
}
