//! Prometheus metrics for the resolution engine.

use once_cell::sync::Lazy;
use prometheus::{Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts};

/// Resolution passes total by outcome.
pub static RESOLUTION_PASSES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "showhound_resolution_passes_total",
            "Total resolution passes",
        ),
        &["outcome"], // "resolved", "empty", "aborted"
    )
    .unwrap()
});

/// Candidates rejected by the filter pipeline, by reason.
pub static CANDIDATES_REJECTED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "showhound_candidates_rejected_total",
            "Candidates rejected during filtering",
        ),
        &["reason"], // "malformed", "junk", "words", "failed_history"
    )
    .unwrap()
});

/// Season packs by disposition.
pub static SEASON_PACKS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "showhound_season_packs_total",
            "Season pack candidates by disposition",
        ),
        &["disposition"], // "adopted", "discarded", "exploded"
    )
    .unwrap()
});

/// Early stops total.
pub static EARLY_STOPS: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "showhound_early_stops_total",
        "Passes stopped early on a good-enough match",
    )
    .unwrap()
});

/// Providers queried per pass.
pub static PROVIDERS_QUERIED: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "showhound_providers_queried",
            "Providers queried per resolution pass",
        )
        .buckets(vec![1.0, 2.0, 3.0, 5.0, 10.0, 20.0]),
    )
    .unwrap()
});

/// Results returned per pass.
pub static RESULTS_RETURNED: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "showhound_results_returned",
            "Chosen candidates per resolution pass",
        )
        .buckets(vec![0.0, 1.0, 2.0, 5.0, 10.0, 25.0]),
    )
    .unwrap()
});

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(RESOLUTION_PASSES.clone()),
        Box::new(CANDIDATES_REJECTED.clone()),
        Box::new(SEASON_PACKS.clone()),
        Box::new(EARLY_STOPS.clone()),
        Box::new(PROVIDERS_QUERIED.clone()),
        Box::new(RESULTS_RETURNED.clone()),
    ]
}
