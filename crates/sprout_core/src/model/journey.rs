//! Journey snapshot model.
//!
//! # Responsibility
//! - Define the nested phase/domain/milestone/activity shape handed to UI
//!   callers and read from seed data.
//! - Keep wire naming stable for FFI and seed JSON.
//!
//! # Invariants
//! - `Milestone::observed == false` implies `date_observed == None`, and
//!   `observed == true` implies `date_observed == Some(_)`.
//! - `Domain::progress` mirrors the observed-milestone percentage at the time
//!   the snapshot was taken.
//!
//! Snapshots are plain values. Mutation goes through
//! [`crate::journey::tree::JourneyTree`], never through these structs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Developmental age band, e.g. "0-2 Months".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub domains: Vec<Domain>,
}

/// Developmental category inside one phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub id: String,
    pub name: String,
    /// Icon asset name resolved by the UI shell.
    #[serde(default)]
    pub icon: String,
    /// Display color as `#RRGGBB`.
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub description: String,
    /// Observed-milestone percentage, 0..=100.
    ///
    /// Ignored on input; recomputed by the tree.
    #[serde(default)]
    pub progress: u8,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
}

/// Observable developmental behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Human-readable age label, e.g. "6-8 weeks".
    #[serde(default)]
    pub age_range: String,
    #[serde(default)]
    pub observed: bool,
    /// Calendar date (`YYYY-MM-DD`) the milestone was marked observed.
    #[serde(default)]
    pub date_observed: Option<NaiveDate>,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

/// Suggested exercise tied to one milestone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}
