//! Quality domain and per-show quality preferences.
//!
//! Qualities form a total order with an `Unknown` sentinel at the bottom.
//! `Unknown` never participates in "best of set" computations - use
//! [`best_of`] instead of a plain max when that guarantee matters.

mod types;

pub use types::{best_of, Quality, QualityPreference};
