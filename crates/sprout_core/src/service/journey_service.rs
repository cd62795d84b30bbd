//! Journey screen use-case service.
//!
//! # Responsibility
//! - Hold the mounted screen's tree, selection, config and clock.
//! - Route UI events (tap, swipe release, toggles, detail navigation) to the
//!   tree and selection state machine.
//! - Apply [`UnresolvedIdPolicy`] uniformly to lookup misses.
//!
//! # Invariants
//! - Toggles target the currently selected phase/domain only.
//! - A lookup miss never mutates tree or selection, whatever the policy.
//! - Logged fields are ids and flags; no free text.

use crate::clock::{Clock, SystemClock};
use crate::config::{JourneyConfig, UnresolvedIdPolicy};
use crate::journey::error::JourneyError;
use crate::journey::gesture::{SwipeDirection, SwipeTracker};
use crate::journey::selection::JourneySelection;
use crate::journey::tree::{ActivityToggled, JourneyTree, MilestoneToggled};
use crate::journey::view_mode::ViewMode;
use crate::model::journey::{Domain, Milestone, Phase};
use log::{error, info, warn};

/// Journey screen state holder.
pub struct JourneyService<C: Clock = SystemClock> {
    tree: JourneyTree,
    selection: JourneySelection,
    config: JourneyConfig,
    clock: C,
}

impl JourneyService<SystemClock> {
    /// Mounts the screen on the bundled seed data with the device clock.
    pub fn from_seed(config: JourneyConfig) -> Result<Self, JourneyError> {
        Self::new(JourneyTree::seed()?, config, SystemClock)
    }
}

impl<C: Clock> JourneyService<C> {
    /// Mounts the screen on `tree`, selecting its first phase.
    ///
    /// # Errors
    /// - `InvalidConfig` when `config` fails validation.
    /// - `EmptyJourney` when the tree has no phases.
    pub fn new(tree: JourneyTree, config: JourneyConfig, clock: C) -> Result<Self, JourneyError> {
        config
            .validate()
            .map_err(|err| JourneyError::InvalidConfig(err.to_string()))?;
        let phase_id = tree
            .first_phase_id()
            .ok_or(JourneyError::EmptyJourney)?
            .to_string();
        info!(
            "event=journey_mount module=journey status=ok phases={} phase_id={}",
            tree.phase_ids().len(),
            phase_id
        );
        Ok(Self {
            tree,
            selection: JourneySelection::new(phase_id),
            config,
            clock,
        })
    }

    pub fn tree(&self) -> &JourneyTree {
        &self.tree
    }

    pub fn selection(&self) -> &JourneySelection {
        &self.selection
    }

    pub fn config(&self) -> &JourneyConfig {
        &self.config
    }

    pub fn view_mode(&self) -> ViewMode {
        self.selection.view_mode()
    }

    /// Fresh tracker using the configured threshold.
    pub fn swipe_tracker(&self) -> SwipeTracker {
        SwipeTracker::new(self.config.swipe_threshold_px)
    }

    /// Switches phase, clearing domain, milestone and view mode.
    ///
    /// Returns `Ok(false)` when the id was ignored.
    pub fn select_phase(&mut self, phase_id: &str) -> Result<bool, JourneyError> {
        let resolved = self.tree.ensure_phase(phase_id);
        if self.settle("phase_select", resolved)?.is_none() {
            return Ok(false);
        }
        self.selection.select_phase(phase_id);
        info!("event=phase_select module=journey status=ok phase_id={phase_id}");
        Ok(true)
    }

    /// Tap on a domain card in the selected phase.
    pub fn tap_domain(&mut self, domain_id: &str) -> Result<Option<ViewMode>, JourneyError> {
        let resolved = self.tree.ensure_domain(self.selection.phase_id(), domain_id);
        if self.settle("domain_tap", resolved)?.is_none() {
            return Ok(None);
        }
        let mode = self.selection.tap_domain(domain_id);
        info!(
            "event=domain_tap module=journey status=ok domain_id={domain_id} view_mode={}",
            mode.label()
        );
        Ok(Some(mode))
    }

    /// Committed swipe on a domain card in the selected phase.
    pub fn swipe_domain(
        &mut self,
        domain_id: &str,
        direction: SwipeDirection,
    ) -> Result<Option<ViewMode>, JourneyError> {
        let resolved = self.tree.ensure_domain(self.selection.phase_id(), domain_id);
        if self.settle("domain_swipe", resolved)?.is_none() {
            return Ok(None);
        }
        let mode = self.selection.swipe_domain(domain_id, direction);
        info!(
            "event=domain_swipe module=journey status=ok domain_id={domain_id} direction={:?} view_mode={}",
            direction,
            mode.label()
        );
        Ok(Some(mode))
    }

    /// Classifies a released horizontal distance and applies the swipe.
    ///
    /// Returns `Ok(None)` when the distance stayed under the threshold.
    pub fn release_swipe(
        &mut self,
        domain_id: &str,
        dx: f32,
    ) -> Result<Option<ViewMode>, JourneyError> {
        match SwipeDirection::classify(dx, self.config.swipe_threshold_px) {
            Some(direction) => self.swipe_domain(domain_id, direction),
            None => Ok(None),
        }
    }

    /// Flips `observed` on a milestone of the selected domain.
    pub fn toggle_milestone(
        &mut self,
        milestone_id: &str,
    ) -> Result<Option<MilestoneToggled>, JourneyError> {
        let today = self.clock.today();
        let result = match self.selection.domain_id() {
            Some(domain_id) => self.tree.toggle_milestone(
                self.selection.phase_id(),
                domain_id,
                milestone_id,
                today,
            ),
            None => Err(JourneyError::NoDomainSelected),
        };
        let Some(toggled) = self.settle("milestone_toggle", result)? else {
            return Ok(None);
        };
        info!(
            "event=milestone_toggle module=journey status=ok milestone_id={} observed={} progress={}",
            toggled.milestone_id, toggled.observed, toggled.domain_progress
        );
        Ok(Some(toggled))
    }

    /// Flips `completed` on an activity of a milestone in the selected domain.
    pub fn toggle_activity(
        &mut self,
        milestone_id: &str,
        activity_id: &str,
    ) -> Result<Option<ActivityToggled>, JourneyError> {
        let result = match self.selection.domain_id() {
            Some(domain_id) => self.tree.toggle_activity(
                self.selection.phase_id(),
                domain_id,
                milestone_id,
                activity_id,
            ),
            None => Err(JourneyError::NoDomainSelected),
        };
        let Some(toggled) = self.settle("activity_toggle", result)? else {
            return Ok(None);
        };
        info!(
            "event=activity_toggle module=journey status=ok activity_id={} completed={} completion={}",
            toggled.activity_id, toggled.completed, toggled.activity_completion
        );
        Ok(Some(toggled))
    }

    /// Shows a milestone of the selected domain in detail.
    pub fn select_milestone(&mut self, milestone_id: &str) -> Result<bool, JourneyError> {
        let resolved = match self.selection.domain_id() {
            Some(domain_id) => {
                self.tree
                    .ensure_milestone(self.selection.phase_id(), domain_id, milestone_id)
            }
            None => Err(JourneyError::NoDomainSelected),
        };
        if self.settle("milestone_select", resolved)?.is_none() {
            return Ok(false);
        }
        Ok(self.selection.select_milestone(milestone_id))
    }

    /// Leaves milestone detail. Returns `false` when nothing was detailed.
    pub fn back(&mut self) -> bool {
        let left = self.selection.back();
        info!(
            "event=milestone_back module=journey status={} view_mode={}",
            if left { "ok" } else { "ignored" },
            self.selection.view_mode().label()
        );
        left
    }

    /// Snapshot of the selected phase.
    pub fn selected_phase(&self) -> Result<Phase, JourneyError> {
        self.tree.phase(self.selection.phase_id())
    }

    /// Snapshot of the selected domain card, if any.
    pub fn selected_domain(&self) -> Option<Domain> {
        let domain_id = self.selection.domain_id()?;
        self.tree.domain(self.selection.phase_id(), domain_id).ok()
    }

    /// Snapshot of the milestone shown in detail, if any.
    pub fn detailed_milestone(&self) -> Option<Milestone> {
        let domain_id = self.selection.domain_id()?;
        let milestone_id = self.selection.milestone_id()?;
        self.tree
            .milestone(self.selection.phase_id(), domain_id, milestone_id)
            .ok()
    }

    fn settle<T>(
        &self,
        operation: &'static str,
        result: Result<T, JourneyError>,
    ) -> Result<Option<T>, JourneyError> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.is_unresolved() => match self.config.unresolved_ids {
                UnresolvedIdPolicy::Ignore => {
                    warn!("event={operation} module=journey status=ignored error={err}");
                    Ok(None)
                }
                UnresolvedIdPolicy::Reject => {
                    error!("event={operation} module=journey status=error error={err}");
                    Err(err)
                }
            },
            Err(err) => {
                error!("event={operation} module=journey status=error error={err}");
                Err(err)
            }
        }
    }
}
