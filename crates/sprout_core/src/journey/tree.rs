//! Arena-backed journey tree.
//!
//! # Responsibility
//! - Own phases, domains, milestones and activities in flat vectors addressed
//!   by typed index keys.
//! - Apply milestone/activity toggles in place and keep domain progress
//!   current.
//! - Produce nested [`Phase`] snapshots for callers.
//!
//! # Invariants
//! - Containment is strict: every node has exactly one parent, children are
//!   ordered, there are no back references.
//! - Sibling ids are unique; ids match `^[a-z0-9][a-z0-9-]*$`.
//! - `observed == date_observed.is_some()` for every milestone.
//! - `DomainNode::progress` equals the observed-milestone percentage after
//!   every mutation.
//! - Failed lookups leave the tree untouched.

use crate::journey::error::JourneyError;
use crate::journey::metrics::flag_share;
use crate::model::journey::{Activity, Domain, Milestone, Phase};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static JOURNEY_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9][a-z0-9-]*$").expect("valid journey id regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct DomainKey(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct MilestoneKey(usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ActivityKey(usize);

#[derive(Debug, Clone)]
struct PhaseNode {
    id: String,
    name: String,
    description: String,
    domains: Vec<DomainKey>,
}

#[derive(Debug, Clone)]
struct DomainNode {
    id: String,
    name: String,
    icon: String,
    color: String,
    description: String,
    progress: u8,
    milestones: Vec<MilestoneKey>,
}

#[derive(Debug, Clone)]
struct MilestoneNode {
    id: String,
    title: String,
    description: String,
    age_range: String,
    observed: bool,
    date_observed: Option<NaiveDate>,
    activities: Vec<ActivityKey>,
}

#[derive(Debug, Clone)]
struct ActivityNode {
    id: String,
    title: String,
    description: String,
    completed: bool,
}

/// Result of one milestone toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MilestoneToggled {
    pub milestone_id: String,
    pub observed: bool,
    pub date_observed: Option<NaiveDate>,
    /// Owning domain progress after the toggle.
    pub domain_progress: u8,
}

/// Result of one activity toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityToggled {
    pub activity_id: String,
    pub completed: bool,
    /// Owning milestone activity completion after the toggle.
    pub activity_completion: u8,
}

/// Mutable journey state for one mounted screen.
#[derive(Debug, Clone, Default)]
pub struct JourneyTree {
    phases: Vec<PhaseNode>,
    domains: Vec<DomainNode>,
    milestones: Vec<MilestoneNode>,
    activities: Vec<ActivityNode>,
}

impl JourneyTree {
    /// Builds the arena from nested phase data.
    ///
    /// Input `progress` values are ignored and recomputed.
    ///
    /// # Errors
    /// - `InvalidId` / `DuplicateId` for malformed or clashing ids.
    /// - `InconsistentObservation` when `observed` and `date_observed`
    ///   disagree.
    pub fn from_phases(phases: Vec<Phase>) -> Result<Self, JourneyError> {
        let mut tree = Self::default();
        let mut seen = HashSet::new();
        for phase in phases {
            ensure_unique(&mut seen, "phase", &phase.id)?;
            let mut domain_ids = HashSet::new();
            let mut domains = Vec::with_capacity(phase.domains.len());
            for domain in phase.domains {
                ensure_unique(&mut domain_ids, "domain", &domain.id)?;
                domains.push(tree.insert_domain(domain)?);
            }
            tree.phases.push(PhaseNode {
                id: phase.id,
                name: phase.name,
                description: phase.description,
                domains,
            });
        }
        Ok(tree)
    }

    /// Builds the arena from the bundled seed document.
    pub fn seed() -> Result<Self, JourneyError> {
        Self::from_phases(crate::journey::seed::load_seed()?)
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Phase ids in display order.
    pub fn phase_ids(&self) -> Vec<&str> {
        self.phases.iter().map(|phase| phase.id.as_str()).collect()
    }

    pub fn first_phase_id(&self) -> Option<&str> {
        self.phases.first().map(|phase| phase.id.as_str())
    }

    /// Checks that `phase_id` resolves.
    pub fn ensure_phase(&self, phase_id: &str) -> Result<(), JourneyError> {
        self.find_phase(phase_id).map(|_| ())
    }

    /// Checks that `domain_id` resolves inside `phase_id`.
    pub fn ensure_domain(&self, phase_id: &str, domain_id: &str) -> Result<(), JourneyError> {
        self.find_domain(phase_id, domain_id).map(|_| ())
    }

    /// Checks that `milestone_id` resolves inside `phase_id/domain_id`.
    pub fn ensure_milestone(
        &self,
        phase_id: &str,
        domain_id: &str,
        milestone_id: &str,
    ) -> Result<(), JourneyError> {
        self.find_milestone(phase_id, domain_id, milestone_id)
            .map(|_| ())
    }

    /// Nested snapshot of every phase.
    pub fn phases(&self) -> Vec<Phase> {
        self.phases
            .iter()
            .map(|phase| self.phase_snapshot(phase))
            .collect()
    }

    /// Nested snapshot of one phase.
    pub fn phase(&self, phase_id: &str) -> Result<Phase, JourneyError> {
        let index = self.find_phase(phase_id)?;
        Ok(self.phase_snapshot(&self.phases[index]))
    }

    /// Snapshot of one domain with freshly derived progress.
    pub fn domain(&self, phase_id: &str, domain_id: &str) -> Result<Domain, JourneyError> {
        let key = self.find_domain(phase_id, domain_id)?;
        Ok(self.domain_snapshot(key))
    }

    /// Snapshot of one milestone.
    pub fn milestone(
        &self,
        phase_id: &str,
        domain_id: &str,
        milestone_id: &str,
    ) -> Result<Milestone, JourneyError> {
        let (_, key) = self.find_milestone(phase_id, domain_id, milestone_id)?;
        Ok(self.milestone_snapshot(key))
    }

    /// Derives domain progress from current milestone flags.
    pub fn domain_progress(&self, phase_id: &str, domain_id: &str) -> Result<u8, JourneyError> {
        let key = self.find_domain(phase_id, domain_id)?;
        Ok(self.derive_progress(key))
    }

    /// Flips one milestone's observed flag.
    ///
    /// - false → true stamps `date_observed = today`.
    /// - true → false clears `date_observed`.
    /// - The owning domain progress is recomputed.
    pub fn toggle_milestone(
        &mut self,
        phase_id: &str,
        domain_id: &str,
        milestone_id: &str,
        today: NaiveDate,
    ) -> Result<MilestoneToggled, JourneyError> {
        let (domain_key, milestone_key) = self.find_milestone(phase_id, domain_id, milestone_id)?;

        let node = &mut self.milestones[milestone_key.0];
        node.observed = !node.observed;
        node.date_observed = node.observed.then_some(today);
        let observed = node.observed;
        let date_observed = node.date_observed;

        let domain_progress = self.derive_progress(domain_key);
        self.domains[domain_key.0].progress = domain_progress;

        Ok(MilestoneToggled {
            milestone_id: milestone_id.to_string(),
            observed,
            date_observed,
            domain_progress,
        })
    }

    /// Flips one activity's completed flag.
    ///
    /// Domain progress is not affected; activity completion is tracked as an
    /// independent metric.
    pub fn toggle_activity(
        &mut self,
        phase_id: &str,
        domain_id: &str,
        milestone_id: &str,
        activity_id: &str,
    ) -> Result<ActivityToggled, JourneyError> {
        let (_, milestone_key) = self.find_milestone(phase_id, domain_id, milestone_id)?;
        let activity_key = self
            .milestones[milestone_key.0]
            .activities
            .iter()
            .copied()
            .find(|key| self.activities[key.0].id == activity_id)
            .ok_or_else(|| JourneyError::ActivityNotFound {
                milestone_id: milestone_id.to_string(),
                activity_id: activity_id.to_string(),
            })?;

        let node = &mut self.activities[activity_key.0];
        node.completed = !node.completed;
        let completed = node.completed;

        Ok(ActivityToggled {
            activity_id: activity_id.to_string(),
            completed,
            activity_completion: self.derive_completion(milestone_key),
        })
    }

    /// Checks progress and observation invariants across the whole tree.
    pub fn validate(&self) -> Result<(), JourneyError> {
        for (index, domain) in self.domains.iter().enumerate() {
            let expected = self.derive_progress(DomainKey(index));
            if domain.progress != expected {
                return Err(JourneyError::StaleProgress {
                    domain_id: domain.id.clone(),
                    stored: domain.progress,
                    expected,
                });
            }
        }
        for milestone in &self.milestones {
            if milestone.observed != milestone.date_observed.is_some() {
                return Err(JourneyError::InconsistentObservation(milestone.id.clone()));
            }
        }
        Ok(())
    }

    fn insert_domain(&mut self, domain: Domain) -> Result<DomainKey, JourneyError> {
        let mut milestone_ids = HashSet::new();
        let mut milestones = Vec::with_capacity(domain.milestones.len());
        for milestone in domain.milestones {
            ensure_unique(&mut milestone_ids, "milestone", &milestone.id)?;
            milestones.push(self.insert_milestone(milestone)?);
        }

        let key = DomainKey(self.domains.len());
        self.domains.push(DomainNode {
            id: domain.id,
            name: domain.name,
            icon: domain.icon,
            color: domain.color,
            description: domain.description,
            progress: 0,
            milestones,
        });
        self.domains[key.0].progress = self.derive_progress(key);
        Ok(key)
    }

    fn insert_milestone(&mut self, milestone: Milestone) -> Result<MilestoneKey, JourneyError> {
        if milestone.observed != milestone.date_observed.is_some() {
            return Err(JourneyError::InconsistentObservation(milestone.id));
        }

        let mut activity_ids = HashSet::new();
        let mut activities = Vec::with_capacity(milestone.activities.len());
        for activity in milestone.activities {
            ensure_unique(&mut activity_ids, "activity", &activity.id)?;
            activities.push(ActivityKey(self.activities.len()));
            self.activities.push(ActivityNode {
                id: activity.id,
                title: activity.title,
                description: activity.description,
                completed: activity.completed,
            });
        }

        let key = MilestoneKey(self.milestones.len());
        self.milestones.push(MilestoneNode {
            id: milestone.id,
            title: milestone.title,
            description: milestone.description,
            age_range: milestone.age_range,
            observed: milestone.observed,
            date_observed: milestone.date_observed,
            activities,
        });
        Ok(key)
    }

    fn find_phase(&self, phase_id: &str) -> Result<usize, JourneyError> {
        self.phases
            .iter()
            .position(|phase| phase.id == phase_id)
            .ok_or_else(|| JourneyError::PhaseNotFound(phase_id.to_string()))
    }

    fn find_domain(&self, phase_id: &str, domain_id: &str) -> Result<DomainKey, JourneyError> {
        let phase = &self.phases[self.find_phase(phase_id)?];
        phase
            .domains
            .iter()
            .copied()
            .find(|key| self.domains[key.0].id == domain_id)
            .ok_or_else(|| JourneyError::DomainNotFound {
                phase_id: phase_id.to_string(),
                domain_id: domain_id.to_string(),
            })
    }

    fn find_milestone(
        &self,
        phase_id: &str,
        domain_id: &str,
        milestone_id: &str,
    ) -> Result<(DomainKey, MilestoneKey), JourneyError> {
        let domain_key = self.find_domain(phase_id, domain_id)?;
        let milestone_key = self.domains[domain_key.0]
            .milestones
            .iter()
            .copied()
            .find(|key| self.milestones[key.0].id == milestone_id)
            .ok_or_else(|| JourneyError::MilestoneNotFound {
                domain_id: domain_id.to_string(),
                milestone_id: milestone_id.to_string(),
            })?;
        Ok((domain_key, milestone_key))
    }

    fn derive_progress(&self, key: DomainKey) -> u8 {
        flag_share(
            self.domains[key.0]
                .milestones
                .iter()
                .map(|m| self.milestones[m.0].observed),
        )
    }

    fn derive_completion(&self, key: MilestoneKey) -> u8 {
        flag_share(
            self.milestones[key.0]
                .activities
                .iter()
                .map(|a| self.activities[a.0].completed),
        )
    }

    fn phase_snapshot(&self, phase: &PhaseNode) -> Phase {
        Phase {
            id: phase.id.clone(),
            name: phase.name.clone(),
            description: phase.description.clone(),
            domains: phase
                .domains
                .iter()
                .map(|key| self.domain_snapshot(*key))
                .collect(),
        }
    }

    fn domain_snapshot(&self, key: DomainKey) -> Domain {
        let domain = &self.domains[key.0];
        Domain {
            id: domain.id.clone(),
            name: domain.name.clone(),
            icon: domain.icon.clone(),
            color: domain.color.clone(),
            description: domain.description.clone(),
            progress: self.derive_progress(key),
            milestones: domain
                .milestones
                .iter()
                .map(|m| self.milestone_snapshot(*m))
                .collect(),
        }
    }

    fn milestone_snapshot(&self, key: MilestoneKey) -> Milestone {
        let milestone = &self.milestones[key.0];
        Milestone {
            id: milestone.id.clone(),
            title: milestone.title.clone(),
            description: milestone.description.clone(),
            age_range: milestone.age_range.clone(),
            observed: milestone.observed,
            date_observed: milestone.date_observed,
            activities: milestone
                .activities
                .iter()
                .map(|a| {
                    let activity = &self.activities[a.0];
                    Activity {
                        id: activity.id.clone(),
                        title: activity.title.clone(),
                        description: activity.description.clone(),
                        completed: activity.completed,
                    }
                })
                .collect(),
        }
    }
}

fn ensure_unique(
    seen: &mut HashSet<String>,
    scope: &'static str,
    id: &str,
) -> Result<(), JourneyError> {
    if !JOURNEY_ID_RE.is_match(id) {
        return Err(JourneyError::InvalidId(id.to_string()));
    }
    if !seen.insert(id.to_string()) {
        return Err(JourneyError::DuplicateId {
            scope,
            id: id.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::JourneyTree;
    use crate::journey::error::JourneyError;
    use crate::model::journey::{Domain, Milestone, Phase};
    use chrono::NaiveDate;

    fn milestone(id: &str) -> Milestone {
        Milestone {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            age_range: String::new(),
            observed: false,
            date_observed: None,
            activities: Vec::new(),
        }
    }

    fn phase_with(domain_id: &str, milestones: Vec<Milestone>) -> Phase {
        Phase {
            id: "p1".to_string(),
            name: "Phase 1".to_string(),
            description: String::new(),
            domains: vec![Domain {
                id: domain_id.to_string(),
                name: domain_id.to_string(),
                icon: String::new(),
                color: String::new(),
                description: String::new(),
                progress: 99,
                milestones,
            }],
        }
    }

    #[test]
    fn from_phases_recomputes_stale_input_progress() {
        let mut observed = milestone("m1");
        observed.observed = true;
        observed.date_observed = NaiveDate::from_ymd_opt(2026, 3, 1);
        let tree =
            JourneyTree::from_phases(vec![phase_with("d1", vec![observed, milestone("m2")])])
                .unwrap();

        assert_eq!(tree.domain("p1", "d1").unwrap().progress, 50);
        tree.validate().unwrap();
    }

    #[test]
    fn from_phases_rejects_duplicate_sibling_ids() {
        let err = JourneyTree::from_phases(vec![phase_with(
            "d1",
            vec![milestone("m1"), milestone("m1")],
        )])
        .unwrap_err();
        assert_eq!(
            err,
            JourneyError::DuplicateId {
                scope: "milestone",
                id: "m1".to_string()
            }
        );
    }

    #[test]
    fn from_phases_rejects_malformed_ids_and_dangling_dates() {
        let err = JourneyTree::from_phases(vec![phase_with("Bad Id", Vec::new())]).unwrap_err();
        assert_eq!(err, JourneyError::InvalidId("Bad Id".to_string()));

        let mut dangling = milestone("m1");
        dangling.date_observed = NaiveDate::from_ymd_opt(2026, 3, 1);
        let err = JourneyTree::from_phases(vec![phase_with("d1", vec![dangling])]).unwrap_err();
        assert_eq!(err, JourneyError::InconsistentObservation("m1".to_string()));
    }

    #[test]
    fn lookup_miss_reports_the_missing_level() {
        let mut tree = JourneyTree::from_phases(vec![phase_with("d1", vec![milestone("m1")])])
            .unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();

        assert_eq!(
            tree.toggle_milestone("nope", "d1", "m1", today).unwrap_err(),
            JourneyError::PhaseNotFound("nope".to_string())
        );
        assert!(matches!(
            tree.toggle_milestone("p1", "d9", "m1", today).unwrap_err(),
            JourneyError::DomainNotFound { .. }
        ));
        assert!(matches!(
            tree.toggle_activity("p1", "d1", "m1", "a9").unwrap_err(),
            JourneyError::ActivityNotFound { .. }
        ));
        assert!(!tree.milestone("p1", "d1", "m1").unwrap().observed);
    }
}
