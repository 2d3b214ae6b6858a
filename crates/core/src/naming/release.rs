//! Release-name checks and word-list filtering.

use regex_lite::Regex;
use tracing::debug;

/// Collaborator deciding whether a release name is usable at all.
pub trait ReleaseNameCheck: Send + Sync {
    /// Whether the name passes the generic "looks like a real episode
    /// release" checks (no samples, sub packs, fix releases, ...).
    fn is_acceptable(&self, name: &str) -> bool;

    /// Whether the name plausibly belongs to the show with the given title.
    fn matches_show(&self, name: &str, show_title: &str) -> bool;
}

/// Whether `name` matches any of the comma-separated `words`.
///
/// Each word is compiled as a standalone case-insensitive boundary pattern
/// `(^|[\W_])word($|[\W_])`. An unparseable word is skipped rather than
/// propagated - filtering never raises.
pub fn matches_any_word(name: &str, words: &str) -> bool {
    for word in words.split(',') {
        let word = word.trim();
        if word.is_empty() {
            continue;
        }
        let pattern = format!("(?i)(^|[\\W_]){}($|[\\W_])", word);
        let Ok(re) = Regex::new(&pattern) else {
            debug!(word, "skipping unparseable filter word");
            continue;
        };
        if re.is_match(name) {
            debug!(name, word, "release name matched filter word");
            return true;
        }
    }
    false
}

/// Junk-release patterns: names matching any of these are not usable
/// episode releases.
const JUNK_PATTERNS: &[&str] = &[
    r"(?i)(^|[\W_])sub(pack|s|bed)($|[\W_])",
    r"(?i)(^|[\W_])nlsub(bed|s)?($|[\W_])",
    r"(?i)(^|[\W_])swesub(bed)?($|[\W_])",
    r"(?i)(^|[\W_])(dir|sample|nfo)fix($|[\W_])",
    r"(?i)(^|[\W_])sample($|[\W_])",
    r"(?i)(^|[\W_])(dvd)?extras($|[\W_])",
    r"(?i)(^|[\W_])dub(bed)?($|[\W_])",
];

/// Default implementation of [`ReleaseNameCheck`].
pub struct StandardReleaseChecks {
    junk: Vec<Regex>,
}

impl Default for StandardReleaseChecks {
    fn default() -> Self {
        Self::new()
    }
}

impl StandardReleaseChecks {
    pub fn new() -> Self {
        let junk = JUNK_PATTERNS
            .iter()
            .map(|p| Regex::new(p).expect("junk pattern is valid"))
            .collect();
        Self { junk }
    }

    /// Lowercased alphanumeric tokens of `text`, in order.
    fn tokens(text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl ReleaseNameCheck for StandardReleaseChecks {
    fn is_acceptable(&self, name: &str) -> bool {
        if name.trim().is_empty() {
            return false;
        }
        for re in &self.junk {
            if re.is_match(name) {
                debug!(name, pattern = re.as_str(), "rejecting junk release");
                return false;
            }
        }
        true
    }

    fn matches_show(&self, name: &str, show_title: &str) -> bool {
        let title_tokens = Self::tokens(show_title);
        if title_tokens.is_empty() {
            return false;
        }
        let name_tokens = Self::tokens(name);
        // The release must start with the show title, token for token.
        // Scene names prefix the title before season/episode markers.
        if name_tokens.len() < title_tokens.len() {
            return false;
        }
        name_tokens
            .iter()
            .zip(&title_tokens)
            .all(|(n, t)| n == t)
    }
}
