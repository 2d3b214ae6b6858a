//! Release-name heuristics.
//!
//! This module decides whether a raw release title looks like a real episode
//! release for the show at hand, and implements the comma-separated
//! ignore/require word lists from [`ShowPolicy`](crate::show::ShowPolicy).

mod release;

pub use release::{matches_any_word, ReleaseNameCheck, StandardReleaseChecks};
