//! Show-side value types and collaborator traits.
//!
//! The engine never owns show state: wanted-status and season contents are
//! read through the [`EpisodeTracker`] trait, which must be safe for
//! concurrent reads (multiple resolution passes may consult it at once).

mod types;

pub use types::{EpisodeRef, EpisodeTracker, ShowPolicy, ShowRef};
