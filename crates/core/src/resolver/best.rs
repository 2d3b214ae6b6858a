//! Best-candidate selection and quality predicates.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex_lite::Regex;
use tracing::debug;

use crate::history::FailureHistory;
use crate::quality::Quality;
use crate::show::ShowPolicy;

use super::filter::{passes_word_filters, previously_failed};
use super::types::Candidate;

static PROPER_REPACK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(^|[\. _-])(proper|repack)([\. _-]|$)").unwrap());

/// Whether the release name marks a proper or repack.
pub fn is_proper_or_repack(name: &str) -> bool {
    PROPER_REPACK.is_match(name)
}

fn is_internal(name: &str) -> bool {
    name.to_lowercase().contains("internal")
}

/// Pick the best candidate out of `candidates`, or `None` if nothing
/// survives.
///
/// Candidates are weighed in input order. When `allowed` is given, qualities
/// outside it are skipped outright. The word and failure checks repeat the
/// filter pipeline as a safety net for callers handing in unfiltered lists.
///
/// An `Unknown`-quality candidate never displaces a known quality. Quality
/// ties break in this order: a proper/repack name wins; otherwise a
/// non-internal release displaces an internal one.
pub fn pick_best(
    candidates: &[Candidate],
    policy: &ShowPolicy,
    allowed: Option<&BTreeSet<Quality>>,
    history: Option<&dyn FailureHistory>,
) -> Option<Candidate> {
    let mut best: Option<&Candidate> = None;

    for candidate in candidates {
        if let Some(allowed) = allowed {
            if !allowed.contains(&candidate.quality) {
                debug!(
                    name = %candidate.name,
                    quality = candidate.quality.as_label(),
                    "quality we know we don't want, rejecting"
                );
                continue;
            }
        }
        if !passes_word_filters(&candidate.name, policy) {
            continue;
        }
        if previously_failed(history, candidate) {
            continue;
        }

        match best {
            None => best = Some(candidate),
            Some(current) => {
                if current.quality < candidate.quality && candidate.quality != Quality::Unknown {
                    best = Some(candidate);
                } else if current.quality == candidate.quality {
                    if is_proper_or_repack(&candidate.name) {
                        best = Some(candidate);
                    } else if is_internal(&current.name) && !is_internal(&candidate.name) {
                        best = Some(candidate);
                    }
                }
            }
        }
    }

    match best {
        Some(picked) => debug!(name = %picked.name, "picked as the best"),
        None => debug!("no candidate picked"),
    }
    best.cloned()
}

/// Whether `candidate` is good enough that searching further providers for
/// an upgrade is pointless.
///
/// True when no upgrade-tier quality outranks it and it tops the applicable
/// tier; the tier maxima exclude `Unknown`.
pub fn is_final_result(candidate: &Candidate, policy: &ShowPolicy) -> bool {
    let best_acceptable = policy.preference.best_acceptable();
    let best_upgrade = policy.preference.best_upgrade();

    // An upgrade above this quality means we keep looking.
    if let Some(upgrade) = best_upgrade {
        if candidate.quality < upgrade {
            return false;
        }
    }

    if best_acceptable == Some(candidate.quality) {
        return true;
    }

    if best_upgrade == Some(candidate.quality) {
        // Best upgrade, but a higher initial download still trumps it.
        if let Some(acceptable) = best_acceptable {
            if candidate.quality < acceptable {
                return false;
            }
        }
        return true;
    }

    false
}

/// Whether the episode should be archived on this first match: the show
/// wants that, and the quality is in the upgrade tier.
pub fn is_first_best_match(candidate: &Candidate, policy: &ShowPolicy) -> bool {
    policy.archive_on_first_match && policy.preference.upgrade.contains(&candidate.quality)
}
