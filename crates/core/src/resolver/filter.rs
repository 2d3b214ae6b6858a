//! Candidate filter pipeline.
//!
//! Drops candidates that are structurally broken, look like junk releases,
//! trip the show's word filters, or previously failed to download. Filtering
//! never mutates a candidate and never raises - a bad candidate is simply
//! removed from the working collection.

use tracing::{debug, warn};

use crate::history::FailureHistory;
use crate::metrics;
use crate::naming::{matches_any_word, ReleaseNameCheck};
use crate::show::{ShowPolicy, ShowRef};

use super::types::Candidate;

/// Read-only collaborators the pipeline consults.
pub struct FilterContext<'a> {
    pub show: &'a ShowRef,
    pub policy: &'a ShowPolicy,
    pub naming: &'a dyn ReleaseNameCheck,
    /// Absent when failure tracking is disabled.
    pub history: Option<&'a dyn FailureHistory>,
}

/// Run the full pipeline over `candidates`, keeping survivors in order.
pub fn filter_candidates(candidates: Vec<Candidate>, ctx: &FilterContext<'_>) -> Vec<Candidate> {
    candidates
        .into_iter()
        .filter(|c| {
            if !c.is_well_formed() {
                debug!(name = %c.name, "dropping malformed candidate");
                metrics::CANDIDATES_REJECTED
                    .with_label_values(&["malformed"])
                    .inc();
                return false;
            }
            if !ctx.naming.is_acceptable(&c.name)
                || !ctx.naming.matches_show(&c.name, &ctx.show.title)
            {
                debug!(name = %c.name, "dropping junk or wrong-show release");
                metrics::CANDIDATES_REJECTED
                    .with_label_values(&["junk"])
                    .inc();
                return false;
            }
            if !passes_word_filters(&c.name, ctx.policy) {
                metrics::CANDIDATES_REJECTED
                    .with_label_values(&["words"])
                    .inc();
                return false;
            }
            if previously_failed(ctx.history, c) {
                metrics::CANDIDATES_REJECTED
                    .with_label_values(&["failed_history"])
                    .inc();
                return false;
            }
            true
        })
        .collect()
}

/// Ignore/require word check against the show policy.
pub(crate) fn passes_word_filters(name: &str, policy: &ShowPolicy) -> bool {
    if !policy.ignore_words.is_empty() && matches_any_word(name, &policy.ignore_words) {
        debug!(name, ignore_words = %policy.ignore_words, "rejecting on ignored words");
        return false;
    }
    if !policy.require_words.is_empty() && !matches_any_word(name, &policy.require_words) {
        debug!(name, require_words = %policy.require_words, "rejecting on required words");
        return false;
    }
    true
}

/// Failure-history lookup that never raises: a backend error counts as
/// "not failed" and is logged.
pub(crate) fn previously_failed(history: Option<&dyn FailureHistory>, c: &Candidate) -> bool {
    let Some(history) = history else {
        return false;
    };
    match history.has_failed(&c.name, c.size_bytes, &c.provider_id) {
        Ok(true) => {
            debug!(name = %c.name, "candidate has previously failed, rejecting");
            true
        }
        Ok(false) => false,
        Err(e) => {
            warn!(name = %c.name, error = %e, "failure-history lookup failed");
            false
        }
    }
}
