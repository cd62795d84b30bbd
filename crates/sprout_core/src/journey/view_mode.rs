//! Domain card view modes and their transition table.
//!
//! # Invariants
//! - `Advance` cycles `Overview → Milestones → Activities → Overview`.
//! - `Retreat` is the exact inverse of `Advance`.
//! - `SelectFresh` always lands on `Overview`.

use serde::{Deserialize, Serialize};

/// What a selected domain card currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Progress summary and description.
    #[default]
    Overview,
    /// Milestone checklist.
    Milestones,
    /// Suggested activities.
    Activities,
}

/// Input that moves a card between view modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewTransition {
    /// Tap on the selected card or swipe left.
    Advance,
    /// Swipe right.
    Retreat,
    /// Card was just selected.
    SelectFresh,
}

const ADVANCE: [ViewMode; 3] = [
    ViewMode::Milestones,
    ViewMode::Activities,
    ViewMode::Overview,
];

const RETREAT: [ViewMode; 3] = [
    ViewMode::Activities,
    ViewMode::Overview,
    ViewMode::Milestones,
];

impl ViewMode {
    /// All modes in cycle order.
    pub const ALL: [ViewMode; 3] = [
        ViewMode::Overview,
        ViewMode::Milestones,
        ViewMode::Activities,
    ];

    fn slot(self) -> usize {
        match self {
            Self::Overview => 0,
            Self::Milestones => 1,
            Self::Activities => 2,
        }
    }

    /// Returns the mode reached by applying `transition`.
    pub fn apply(self, transition: ViewTransition) -> ViewMode {
        match transition {
            ViewTransition::Advance => ADVANCE[self.slot()],
            ViewTransition::Retreat => RETREAT[self.slot()],
            ViewTransition::SelectFresh => ViewMode::Overview,
        }
    }

    /// Stable label used by FFI and logs.
    pub fn label(self) -> &'static str {
        match self {
            Self::Overview => "overview",
            Self::Milestones => "milestones",
            Self::Activities => "activities",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ViewMode, ViewTransition};

    #[test]
    fn advance_cycles_through_all_modes() {
        let mut mode = ViewMode::Overview;
        let mut seen = Vec::new();
        for _ in 0..3 {
            mode = mode.apply(ViewTransition::Advance);
            seen.push(mode);
        }
        assert_eq!(
            seen,
            vec![ViewMode::Milestones, ViewMode::Activities, ViewMode::Overview]
        );
    }

    #[test]
    fn retreat_inverts_advance() {
        for mode in ViewMode::ALL {
            assert_eq!(
                mode.apply(ViewTransition::Advance)
                    .apply(ViewTransition::Retreat),
                mode
            );
        }
        assert_eq!(
            ViewMode::Overview.apply(ViewTransition::Retreat),
            ViewMode::Activities
        );
    }

    #[test]
    fn select_fresh_always_resets() {
        for mode in ViewMode::ALL {
            assert_eq!(mode.apply(ViewTransition::SelectFresh), ViewMode::Overview);
        }
    }
}
