//! Core logic for the Sprout parenting client.
//! This crate is the single source of truth for journey and session invariants.

pub mod clock;
pub mod config;
pub mod db;
pub mod journey;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, JourneyConfig, UnresolvedIdPolicy, DEFAULT_SWIPE_THRESHOLD_PX};
pub use journey::error::JourneyError;
pub use journey::gesture::{SwipeDirection, SwipeTracker};
pub use journey::metrics::{activity_completion, domain_progress, flag_share, percentage};
pub use journey::selection::JourneySelection;
pub use journey::tree::{ActivityToggled, JourneyTree, MilestoneToggled};
pub use journey::view_mode::{ViewMode, ViewTransition};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::journey::{Activity, Domain, Milestone, Phase};
pub use model::profile::{
    BabyProfile, BabySex, ProfileValidationError, SavedItem, SavedKind, UserAccount, UserId,
};
pub use repo::kv_repo::{KeyValueRepository, KvRepoError, KvRepoResult, SqliteKeyValueRepository};
pub use service::app_context::AppContext;
pub use service::journey_service::JourneyService;
pub use service::session_store::{
    SessionStore, SessionStoreError, BABY_DATA_KEY, ONBOARDING_COMPLETED_KEY, USER_KEY,
};

/// Minimal health-check API for shell integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
