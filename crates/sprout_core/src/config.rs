//! Journey runtime configuration.
//!
//! # Responsibility
//! - Hold tunables for gesture classification and unresolved-id handling.
//! - Load overrides from a JSON document supplied by the shell.
//!
//! # Invariants
//! - `swipe_threshold_px` is finite and positive.
//! - Missing JSON fields fall back to build-mode defaults.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Horizontal distance a swipe must cover before release commits it.
pub const DEFAULT_SWIPE_THRESHOLD_PX: f32 = 50.0;

/// How journey operations treat ids that do not resolve in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedIdPolicy {
    /// Log a warning and leave state untouched.
    Ignore,
    /// Return the lookup error to the caller. State is still untouched.
    Reject,
}

impl Default for UnresolvedIdPolicy {
    /// `Reject` in debug builds, `Ignore` in release builds.
    fn default() -> Self {
        if cfg!(debug_assertions) {
            Self::Reject
        } else {
            Self::Ignore
        }
    }
}

/// Configuration for one journey screen session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JourneyConfig {
    pub swipe_threshold_px: f32,
    pub unresolved_ids: UnresolvedIdPolicy,
}

impl Default for JourneyConfig {
    fn default() -> Self {
        Self {
            swipe_threshold_px: DEFAULT_SWIPE_THRESHOLD_PX,
            unresolved_ids: UnresolvedIdPolicy::default(),
        }
    }
}

/// Errors from configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    InvalidSwipeThreshold(f32),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid journey config: {err}"),
            Self::InvalidSwipeThreshold(value) => {
                write!(f, "swipe threshold must be finite and positive, got {value}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::InvalidSwipeThreshold(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl JourneyConfig {
    /// Config with an explicit unresolved-id policy and default threshold.
    pub fn with_policy(unresolved_ids: UnresolvedIdPolicy) -> Self {
        Self {
            unresolved_ids,
            ..Self::default()
        }
    }

    /// Parses a JSON override document and validates it.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.swipe_threshold_px.is_finite() || self.swipe_threshold_px <= 0.0 {
            return Err(ConfigError::InvalidSwipeThreshold(self.swipe_threshold_px));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, JourneyConfig, UnresolvedIdPolicy, DEFAULT_SWIPE_THRESHOLD_PX};

    #[test]
    fn empty_document_uses_defaults() {
        let config = JourneyConfig::from_json_str("{}").unwrap();
        assert_eq!(config, JourneyConfig::default());
        assert_eq!(config.swipe_threshold_px, DEFAULT_SWIPE_THRESHOLD_PX);
    }

    #[test]
    fn overrides_are_applied() {
        let config = JourneyConfig::from_json_str(
            r#"{"swipe_threshold_px": 80.0, "unresolved_ids": "ignore"}"#,
        )
        .unwrap();
        assert_eq!(config.swipe_threshold_px, 80.0);
        assert_eq!(config.unresolved_ids, UnresolvedIdPolicy::Ignore);
    }

    #[test]
    fn rejects_non_positive_threshold() {
        let err = JourneyConfig::from_json_str(r#"{"swipe_threshold_px": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidSwipeThreshold(_)));
    }

    #[test]
    fn default_policy_is_strict_in_debug_builds() {
        let expected = if cfg!(debug_assertions) {
            UnresolvedIdPolicy::Reject
        } else {
            UnresolvedIdPolicy::Ignore
        };
        assert_eq!(UnresolvedIdPolicy::default(), expected);
    }
}
