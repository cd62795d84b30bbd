//! Journey screen selection state.
//!
//! # Responsibility
//! - Track the selected phase, the selected domain card, its view mode and
//!   the milestone currently shown in detail.
//!
//! # Invariants
//! - No domain selected implies view mode `Overview` and no detailed
//!   milestone.
//! - Changing phase or domain resets the view mode to `Overview`.
//! - At most one milestone is detailed at a time.
//!
//! This type does not know the tree. Callers resolve ids before applying
//! transitions.

use crate::journey::gesture::SwipeDirection;
use crate::journey::view_mode::{ViewMode, ViewTransition};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JourneySelection {
    phase_id: String,
    domain_id: Option<String>,
    view_mode: ViewMode,
    milestone_id: Option<String>,
}

impl JourneySelection {
    /// Starts on `phase_id` with nothing else selected.
    pub fn new(phase_id: impl Into<String>) -> Self {
        Self {
            phase_id: phase_id.into(),
            domain_id: None,
            view_mode: ViewMode::Overview,
            milestone_id: None,
        }
    }

    pub fn phase_id(&self) -> &str {
        &self.phase_id
    }

    pub fn domain_id(&self) -> Option<&str> {
        self.domain_id.as_deref()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn milestone_id(&self) -> Option<&str> {
        self.milestone_id.as_deref()
    }

    /// Switches phase and clears every nested selection.
    pub fn select_phase(&mut self, phase_id: impl Into<String>) {
        self.phase_id = phase_id.into();
        self.domain_id = None;
        self.milestone_id = None;
        self.view_mode = ViewMode::Overview;
    }

    /// Tap on a domain card.
    ///
    /// Selected card: advance. Other card: select it at `Overview`.
    pub fn tap_domain(&mut self, domain_id: &str) -> ViewMode {
        if self.is_selected(domain_id) {
            self.transition(ViewTransition::Advance)
        } else {
            self.focus_domain(domain_id)
        }
    }

    /// Committed swipe on a domain card.
    ///
    /// An unselected card is selected first, then moved one step.
    pub fn swipe_domain(&mut self, domain_id: &str, direction: SwipeDirection) -> ViewMode {
        if !self.is_selected(domain_id) {
            self.focus_domain(domain_id);
        }
        let transition = match direction {
            SwipeDirection::Left => ViewTransition::Advance,
            SwipeDirection::Right => ViewTransition::Retreat,
        };
        self.transition(transition)
    }

    /// Shows one milestone in detail, replacing any previous one.
    ///
    /// Returns `false` when no domain is selected.
    pub fn select_milestone(&mut self, milestone_id: impl Into<String>) -> bool {
        if self.domain_id.is_none() {
            return false;
        }
        self.milestone_id = Some(milestone_id.into());
        true
    }

    /// Leaves milestone detail for the milestone list.
    ///
    /// Returns `false` when nothing was detailed.
    pub fn back(&mut self) -> bool {
        if self.milestone_id.take().is_none() {
            return false;
        }
        self.view_mode = ViewMode::Milestones;
        true
    }

    fn is_selected(&self, domain_id: &str) -> bool {
        self.domain_id.as_deref() == Some(domain_id)
    }

    fn focus_domain(&mut self, domain_id: &str) -> ViewMode {
        self.domain_id = Some(domain_id.to_string());
        self.milestone_id = None;
        self.transition(ViewTransition::SelectFresh)
    }

    fn transition(&mut self, transition: ViewTransition) -> ViewMode {
        self.view_mode = self.view_mode.apply(transition);
        self.view_mode
    }
}

#[cfg(test)]
mod tests {
    use super::JourneySelection;
    use crate::journey::gesture::SwipeDirection;
    use crate::journey::view_mode::ViewMode;

    #[test]
    fn first_tap_selects_without_advancing() {
        let mut selection = JourneySelection::new("phase-a");
        assert_eq!(selection.tap_domain("physical"), ViewMode::Overview);
        assert_eq!(selection.domain_id(), Some("physical"));
        assert_eq!(selection.tap_domain("physical"), ViewMode::Milestones);
    }

    #[test]
    fn three_taps_on_selected_card_close_the_cycle() {
        let mut selection = JourneySelection::new("phase-a");
        selection.tap_domain("physical");
        for _ in 0..3 {
            selection.tap_domain("physical");
        }
        assert_eq!(selection.view_mode(), ViewMode::Overview);
    }

    #[test]
    fn tapping_other_card_resets_view_and_detail() {
        let mut selection = JourneySelection::new("phase-a");
        selection.tap_domain("physical");
        selection.tap_domain("physical");
        assert!(selection.select_milestone("lifts-head"));

        assert_eq!(selection.tap_domain("language"), ViewMode::Overview);
        assert_eq!(selection.milestone_id(), None);
    }

    #[test]
    fn swipe_left_on_unselected_card_selects_then_advances() {
        let mut selection = JourneySelection::new("phase-a");
        let mode = selection.swipe_domain("social", SwipeDirection::Left);
        assert_eq!(selection.domain_id(), Some("social"));
        assert_eq!(mode, ViewMode::Milestones);
    }

    #[test]
    fn swipe_right_moves_backward_without_negative_wrap() {
        let mut selection = JourneySelection::new("phase-a");
        selection.tap_domain("social");
        assert_eq!(
            selection.swipe_domain("social", SwipeDirection::Right),
            ViewMode::Activities
        );
        assert_eq!(
            selection.swipe_domain("social", SwipeDirection::Right),
            ViewMode::Milestones
        );
    }

    #[test]
    fn phase_switch_clears_everything() {
        let mut selection = JourneySelection::new("phase-a");
        selection.tap_domain("physical");
        selection.tap_domain("physical");
        selection.select_milestone("rolls-over");

        selection.select_phase("phase-b");
        assert_eq!(selection.phase_id(), "phase-b");
        assert_eq!(selection.domain_id(), None);
        assert_eq!(selection.milestone_id(), None);
        assert_eq!(selection.view_mode(), ViewMode::Overview);
    }

    #[test]
    fn back_returns_to_milestone_list() {
        let mut selection = JourneySelection::new("phase-a");
        assert!(!selection.select_milestone("orphan"));

        selection.tap_domain("physical");
        assert!(selection.select_milestone("lifts-head"));
        assert!(selection.select_milestone("rolls-over"));
        assert_eq!(selection.milestone_id(), Some("rolls-over"));

        assert!(selection.back());
        assert_eq!(selection.milestone_id(), None);
        assert_eq!(selection.view_mode(), ViewMode::Milestones);
        assert_eq!(selection.domain_id(), Some("physical"));
        assert!(!selection.back());
    }
}
