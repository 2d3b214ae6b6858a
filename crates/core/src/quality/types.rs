//! Quality values and the two-tier preference model.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Release quality, ordered worst to best.
///
/// The derived `Ord` ranks `Unknown` lowest, but `Unknown` must never win a
/// "best available" computation - callers computing a maximum go through
/// [`best_of`], which excludes it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Quality {
    /// Quality could not be determined from the release name.
    Unknown,
    /// SD TV capture.
    Sdtv,
    /// SD DVD rip.
    SdDvd,
    /// 720p TV capture.
    Hdtv,
    /// Raw 1080i TV transport stream.
    RawHdtv,
    /// 1080p TV capture.
    Hdtv1080,
    /// 720p web download.
    WebDl720,
    /// 1080p web download.
    WebDl1080,
    /// 720p bluray rip.
    Bluray720,
    /// 1080p bluray rip.
    Bluray1080,
}

impl Quality {
    /// Short label used in release names and log lines.
    pub fn as_label(&self) -> &'static str {
        match self {
            Quality::Unknown => "unknown",
            Quality::Sdtv => "sdtv",
            Quality::SdDvd => "sd dvd",
            Quality::Hdtv => "hdtv",
            Quality::RawHdtv => "raw hdtv",
            Quality::Hdtv1080 => "1080p hdtv",
            Quality::WebDl720 => "720p web-dl",
            Quality::WebDl1080 => "1080p web-dl",
            Quality::Bluray720 => "720p bluray",
            Quality::Bluray1080 => "1080p bluray",
        }
    }
}

/// Best quality in `values`, excluding `Unknown`.
///
/// Returns `None` when the input is empty or contains only `Unknown`.
pub fn best_of<I>(values: I) -> Option<Quality>
where
    I: IntoIterator<Item = Quality>,
{
    values
        .into_iter()
        .filter(|q| *q != Quality::Unknown)
        .max()
}

/// Per-show quality preference, split into two independent tiers.
///
/// `acceptable` qualities are a satisfactory first download; `upgrade`
/// ("archive") qualities justify replacing an already-acceptable download.
/// The tiers may overlap and either may be empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct QualityPreference {
    #[serde(default)]
    pub acceptable: BTreeSet<Quality>,
    #[serde(default)]
    pub upgrade: BTreeSet<Quality>,
}

impl QualityPreference {
    pub fn new<A, U>(acceptable: A, upgrade: U) -> Self
    where
        A: IntoIterator<Item = Quality>,
        U: IntoIterator<Item = Quality>,
    {
        Self {
            acceptable: acceptable.into_iter().collect(),
            upgrade: upgrade.into_iter().collect(),
        }
    }

    /// The two tier sets, acceptable first.
    pub fn tiers(&self) -> (&BTreeSet<Quality>, &BTreeSet<Quality>) {
        (&self.acceptable, &self.upgrade)
    }

    /// Union of both tiers - every quality the show will take at all.
    pub fn allowed(&self) -> BTreeSet<Quality> {
        self.acceptable.union(&self.upgrade).copied().collect()
    }

    /// Best upgrade-tier quality, excluding `Unknown`.
    pub fn best_upgrade(&self) -> Option<Quality> {
        best_of(self.upgrade.iter().copied())
    }

    /// Best acceptable-tier quality, excluding `Unknown`.
    pub fn best_acceptable(&self) -> Option<Quality> {
        best_of(self.acceptable.iter().copied())
    }
}
