pub mod config;
pub mod history;
pub mod metrics;
pub mod naming;
pub mod provider;
pub mod quality;
pub mod resolver;
pub mod show;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, EngineConfig,
    HistoryConfig,
};
pub use history::{normalize_release_name, FailureHistory, HistoryError, SqliteFailureHistory};
pub use naming::{matches_any_word, ReleaseNameCheck, StandardReleaseChecks};
pub use provider::{Provider, ProviderError, ProviderKind, SeasonSplitter, SplitError};
pub use quality::{best_of, Quality, QualityPreference};
pub use resolver::{
    is_final_result, is_first_best_match, is_proper_or_repack, pick_best, Candidate,
    CandidateKind, Resolution, ResolutionEngine, ResolutionRequest, ResolveError,
};
pub use show::{EpisodeRef, EpisodeTracker, ShowPolicy, ShowRef};
