//! Search result resolution.
//!
//! Takes raw per-provider candidate lists for a wanted episode set and
//! produces the minimal, highest-quality, non-overlapping set of candidates
//! to acquire. Reconciles single-episode, multi-episode and full-season
//! granularities against the show's two-tier quality preference, suppresses
//! previously-failed and policy-excluded releases, and stops searching early
//! once a good-enough match is found.

mod best;
mod engine;
mod filter;
mod multi;
mod season;
mod types;
mod working_set;

pub use best::{is_final_result, is_first_best_match, is_proper_or_repack, pick_best};
pub use engine::ResolutionEngine;
pub use filter::{filter_candidates, FilterContext};
pub use multi::reconcile_multis;
pub use season::{reconcile_season, SeasonContext, SeasonDisposition};
pub use types::{Candidate, CandidateKind, Resolution, ResolutionRequest, ResolveError};
pub use working_set::WorkingSet;
