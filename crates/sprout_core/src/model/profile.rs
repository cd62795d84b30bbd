//! Account, baby profile and saved-content records.
//!
//! # Responsibility
//! - Define the records held by [`crate::service::app_context::AppContext`]
//!   and persisted as JSON blobs by the session store.
//!
//! # Invariants
//! - `UserAccount::id` is a non-nil uuid and never reused.
//! - Display names and emails are trimmed and non-empty.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

/// Stable identifier for the signed-in account.
pub type UserId = Uuid;

/// Validation errors for profile records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileValidationError {
    NilUserId,
    EmptyEmail,
    MalformedEmail(String),
    EmptyDisplayName,
    EmptyBabyName,
    UnknownSavedKind(String),
    UnknownBabySex(String),
}

impl Display for ProfileValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilUserId => write!(f, "user id must not be nil"),
            Self::EmptyEmail => write!(f, "email must not be blank"),
            Self::MalformedEmail(value) => write!(f, "email is malformed: `{value}`"),
            Self::EmptyDisplayName => write!(f, "display name must not be blank"),
            Self::EmptyBabyName => write!(f, "baby name must not be blank"),
            Self::UnknownSavedKind(value) => write!(f, "unknown saved kind: `{value}`"),
            Self::UnknownBabySex(value) => write!(f, "unknown baby sex: `{value}`"),
        }
    }
}

impl Error for ProfileValidationError {}

/// Signed-in account. Authentication itself is mocked by the shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: UserId,
    pub email: String,
    pub display_name: String,
}

impl UserAccount {
    /// Creates an account with a generated id.
    pub fn new(
        email: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Result<Self, ProfileValidationError> {
        Self::with_id(Uuid::new_v4(), email, display_name)
    }

    /// Creates an account with a caller-provided id.
    pub fn with_id(
        id: UserId,
        email: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Result<Self, ProfileValidationError> {
        if id.is_nil() {
            return Err(ProfileValidationError::NilUserId);
        }
        let email = normalize_email(email.into())?;
        let display_name = display_name.into().trim().to_string();
        if display_name.is_empty() {
            return Err(ProfileValidationError::EmptyDisplayName);
        }
        Ok(Self {
            id,
            email,
            display_name,
        })
    }
}

/// Biological sex as optionally recorded during onboarding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BabySex {
    Female,
    Male,
}

impl FromStr for BabySex {
    type Err = ProfileValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "female" => Ok(Self::Female),
            "male" => Ok(Self::Male),
            _ => Err(ProfileValidationError::UnknownBabySex(value.to_string())),
        }
    }
}

/// Baby details captured by onboarding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BabyProfile {
    pub name: String,
    pub birth_date: NaiveDate,
    #[serde(default)]
    pub sex: Option<BabySex>,
}

impl BabyProfile {
    pub fn new(
        name: impl Into<String>,
        birth_date: NaiveDate,
        sex: Option<BabySex>,
    ) -> Result<Self, ProfileValidationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ProfileValidationError::EmptyBabyName);
        }
        Ok(Self {
            name,
            birth_date,
            sex,
        })
    }

    /// Whole weeks between birth and `today`. Future birth dates yield 0.
    pub fn age_in_weeks(&self, today: NaiveDate) -> u32 {
        let days = today.signed_duration_since(self.birth_date).num_days();
        if days <= 0 {
            return 0;
        }
        u32::try_from(days / 7).unwrap_or(u32::MAX)
    }
}

/// Content category a saved item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SavedKind {
    /// Daily developmental insight from the Today tab.
    Insight,
    /// Answered question from the Ask tab.
    Question,
    /// Suggested journey activity.
    Activity,
    /// Journey milestone.
    Milestone,
}

impl SavedKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Insight => "insight",
            Self::Question => "question",
            Self::Activity => "activity",
            Self::Milestone => "milestone",
        }
    }
}

impl FromStr for SavedKind {
    type Err = ProfileValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "insight" => Ok(Self::Insight),
            "question" => Ok(Self::Question),
            "activity" => Ok(Self::Activity),
            "milestone" => Ok(Self::Milestone),
            _ => Err(ProfileValidationError::UnknownSavedKind(value.to_string())),
        }
    }
}

/// Bookmark to static content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedItem {
    pub content_id: String,
    pub kind: SavedKind,
    pub title: String,
    pub saved_on: NaiveDate,
}

fn normalize_email(value: String) -> Result<String, ProfileValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ProfileValidationError::EmptyEmail);
    }
    match trimmed.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => {
            Ok(trimmed.to_ascii_lowercase())
        }
        _ => Err(ProfileValidationError::MalformedEmail(trimmed.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::{BabyProfile, BabySex, ProfileValidationError, SavedKind, UserAccount};
    use chrono::NaiveDate;
    use uuid::Uuid;

    #[test]
    fn user_account_normalizes_email() {
        let user = UserAccount::new("  Parent@Example.COM ", "Sam").unwrap();
        assert_eq!(user.email, "parent@example.com");
        assert!(!user.id.is_nil());
    }

    #[test]
    fn user_account_rejects_nil_id_and_malformed_email() {
        let err = UserAccount::with_id(Uuid::nil(), "a@b.co", "Sam").unwrap_err();
        assert_eq!(err, ProfileValidationError::NilUserId);

        let err = UserAccount::new("not-an-email", "Sam").unwrap_err();
        assert!(matches!(err, ProfileValidationError::MalformedEmail(_)));
    }

    #[test]
    fn age_in_weeks_floors_and_clamps_future_dates() {
        let birth = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let baby = BabyProfile::new("Robin", birth, None).unwrap();

        assert_eq!(baby.age_in_weeks(NaiveDate::from_ymd_opt(2026, 1, 14).unwrap()), 1);
        assert_eq!(baby.age_in_weeks(NaiveDate::from_ymd_opt(2026, 1, 15).unwrap()), 2);
        assert_eq!(baby.age_in_weeks(NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()), 0);
    }

    #[test]
    fn kinds_parse_case_insensitively() {
        assert_eq!(" Question ".parse::<SavedKind>(), Ok(SavedKind::Question));
        assert_eq!(SavedKind::Milestone.as_str(), "milestone");
        assert!(matches!(
            "recipe".parse::<SavedKind>(),
            Err(ProfileValidationError::UnknownSavedKind(_))
        ));
        assert_eq!("FEMALE".parse::<BabySex>(), Ok(BabySex::Female));
        assert!("other".parse::<BabySex>().is_err());
    }
}
