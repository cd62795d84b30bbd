//! Journey error taxonomy.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from journey tree, seed and service operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JourneyError {
    /// Phase id does not exist in the tree.
    PhaseNotFound(String),
    /// Domain id does not exist inside the phase.
    DomainNotFound { phase_id: String, domain_id: String },
    /// Milestone id does not exist inside the domain.
    MilestoneNotFound {
        domain_id: String,
        milestone_id: String,
    },
    /// Activity id does not exist inside the milestone.
    ActivityNotFound {
        milestone_id: String,
        activity_id: String,
    },
    /// A domain-scoped operation ran while no domain card was selected.
    NoDomainSelected,
    /// Tree has no phases to select.
    EmptyJourney,
    /// Id does not match the allowed id shape.
    InvalidId(String),
    /// Two siblings share one id.
    DuplicateId { scope: &'static str, id: String },
    /// Milestone `observed` flag and `date_observed` disagree.
    InconsistentObservation(String),
    /// Stored domain progress differs from the derived value.
    StaleProgress {
        domain_id: String,
        stored: u8,
        expected: u8,
    },
    /// Seed document could not be parsed.
    InvalidSeed(String),
    /// Screen config failed validation.
    InvalidConfig(String),
}

impl JourneyError {
    /// Returns whether this error is a lookup miss rather than a data fault.
    pub fn is_unresolved(&self) -> bool {
        matches!(
            self,
            Self::PhaseNotFound(_)
                | Self::DomainNotFound { .. }
                | Self::MilestoneNotFound { .. }
                | Self::ActivityNotFound { .. }
                | Self::NoDomainSelected
        )
    }
}

impl Display for JourneyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PhaseNotFound(id) => write!(f, "phase not found: {id}"),
            Self::DomainNotFound {
                phase_id,
                domain_id,
            } => write!(f, "domain not found: {domain_id} in phase {phase_id}"),
            Self::MilestoneNotFound {
                domain_id,
                milestone_id,
            } => write!(f, "milestone not found: {milestone_id} in domain {domain_id}"),
            Self::ActivityNotFound {
                milestone_id,
                activity_id,
            } => write!(
                f,
                "activity not found: {activity_id} in milestone {milestone_id}"
            ),
            Self::NoDomainSelected => write!(f, "no domain is selected"),
            Self::EmptyJourney => write!(f, "journey has no phases"),
            Self::InvalidId(id) => write!(f, "invalid journey id: `{id}`"),
            Self::DuplicateId { scope, id } => write!(f, "duplicate {scope} id: {id}"),
            Self::InconsistentObservation(id) => write!(
                f,
                "milestone {id}: observed flag and date_observed disagree"
            ),
            Self::StaleProgress {
                domain_id,
                stored,
                expected,
            } => write!(
                f,
                "domain {domain_id}: stored progress {stored} but expected {expected}"
            ),
            Self::InvalidSeed(message) => write!(f, "invalid journey seed: {message}"),
            Self::InvalidConfig(message) => write!(f, "invalid journey config: {message}"),
        }
    }
}

impl Error for JourneyError {}
