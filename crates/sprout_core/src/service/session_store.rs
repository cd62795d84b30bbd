//! Persistence of onboarding and auth state.
//!
//! # Responsibility
//! - Read [`AppContext`] state on mount, write it on every update and clear
//!   it on reset/sign-out.
//! - Encode each record as a JSON blob under a fixed key.
//!
//! # Invariants
//! - Only the keys [`USER_KEY`], [`BABY_DATA_KEY`] and
//!   [`ONBOARDING_COMPLETED_KEY`] are written.
//! - An absent record removes its key instead of storing `null`.
//! - Saved items are session-only and never persisted.

use crate::model::profile::{BabyProfile, UserAccount};
use crate::repo::kv_repo::{KeyValueRepository, KvRepoError};
use crate::service::app_context::AppContext;
use log::{error, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const USER_KEY: &str = "user";
pub const BABY_DATA_KEY: &str = "babyData";
pub const ONBOARDING_COMPLETED_KEY: &str = "onboardingCompleted";

const SESSION_KEYS: [&str; 3] = [USER_KEY, BABY_DATA_KEY, ONBOARDING_COMPLETED_KEY];

#[derive(Debug)]
pub enum SessionStoreError {
    Repo(KvRepoError),
    Serialization {
        key: &'static str,
        source: serde_json::Error,
    },
}

impl Display for SessionStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Serialization { key, source } => {
                write!(f, "stored `{key}` blob is unreadable: {source}")
            }
        }
    }
}

impl Error for SessionStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Serialization { source, .. } => Some(source),
        }
    }
}

impl From<KvRepoError> for SessionStoreError {
    fn from(value: KvRepoError) -> Self {
        Self::Repo(value)
    }
}

/// Session persistence facade over a key-value repository.
pub struct SessionStore<R: KeyValueRepository> {
    repo: R,
}

impl<R: KeyValueRepository> SessionStore<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Reads persisted state. Missing keys fall back to defaults.
    pub fn load(&self) -> Result<AppContext, SessionStoreError> {
        let user: Option<UserAccount> = self.read(USER_KEY)?;
        let baby: Option<BabyProfile> = self.read(BABY_DATA_KEY)?;
        let onboarding_completed: bool = self.read(ONBOARDING_COMPLETED_KEY)?.unwrap_or(false);
        info!(
            "event=session_load module=session status=ok signed_in={} has_baby={} onboarding_completed={}",
            user.is_some(),
            baby.is_some(),
            onboarding_completed
        );
        Ok(AppContext::restore(user, baby, onboarding_completed))
    }

    /// Writes every persisted field of `ctx`.
    pub fn persist(&self, ctx: &AppContext) -> Result<(), SessionStoreError> {
        self.write(USER_KEY, ctx.user())?;
        self.write(BABY_DATA_KEY, ctx.baby())?;
        self.write(
            ONBOARDING_COMPLETED_KEY,
            Some(&ctx.is_onboarding_completed()),
        )?;
        info!("event=session_persist module=session status=ok");
        Ok(())
    }

    /// Removes every session key.
    pub fn clear(&self) -> Result<(), SessionStoreError> {
        for key in SESSION_KEYS {
            self.repo.remove(key)?;
        }
        info!("event=session_clear module=session status=ok");
        Ok(())
    }

    fn read<T: DeserializeOwned>(&self, key: &'static str) -> Result<Option<T>, SessionStoreError> {
        let Some(raw) = self.repo.get(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&raw).map(Some).map_err(|source| {
            error!("event=session_load module=session status=error key={key} error={source}");
            SessionStoreError::Serialization { key, source }
        })
    }

    fn write<T: Serialize>(
        &self,
        key: &'static str,
        value: Option<&T>,
    ) -> Result<(), SessionStoreError> {
        match value {
            Some(value) => {
                let raw = serde_json::to_string(value)
                    .map_err(|source| SessionStoreError::Serialization { key, source })?;
                self.repo.set(key, &raw)?;
            }
            None => {
                self.repo.remove(key)?;
            }
        }
        Ok(())
    }
}
