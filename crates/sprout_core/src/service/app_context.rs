//! App-wide user state passed explicitly to screens.
//!
//! # Responsibility
//! - Hold the signed-in account, baby profile, onboarding flag and saved
//!   content for one app session.
//! - Screens receive `&AppContext` / `&mut AppContext` from the shell; there
//!   is no ambient global.
//!
//! # Invariants
//! - A content id appears at most once in the saved list.
//! - `sign_out` leaves the context equal to `AppContext::default()`.

use crate::model::profile::{BabyProfile, SavedItem, SavedKind, UserAccount};
use chrono::NaiveDate;
use std::cmp::Reverse;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppContext {
    user: Option<UserAccount>,
    baby: Option<BabyProfile>,
    onboarding_completed: bool,
    saved: Vec<SavedItem>,
}

impl AppContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds persisted state read on mount. Saved items start empty.
    pub fn restore(
        user: Option<UserAccount>,
        baby: Option<BabyProfile>,
        onboarding_completed: bool,
    ) -> Self {
        Self {
            user,
            baby,
            onboarding_completed,
            saved: Vec::new(),
        }
    }

    pub fn user(&self) -> Option<&UserAccount> {
        self.user.as_ref()
    }

    pub fn baby(&self) -> Option<&BabyProfile> {
        self.baby.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_onboarding_completed(&self) -> bool {
        self.onboarding_completed
    }

    pub fn sign_in(&mut self, user: UserAccount) {
        self.user = Some(user);
    }

    /// Clears every piece of session state.
    pub fn sign_out(&mut self) {
        *self = Self::default();
    }

    /// Replaces the baby profile (profile edit screen).
    pub fn set_baby(&mut self, baby: BabyProfile) {
        self.baby = Some(baby);
    }

    /// Final onboarding step: stores the profile and marks onboarding done.
    pub fn complete_onboarding(&mut self, baby: BabyProfile) {
        self.baby = Some(baby);
        self.onboarding_completed = true;
    }

    /// Sends the user back through onboarding. Account is kept.
    pub fn reset_onboarding(&mut self) {
        self.baby = None;
        self.onboarding_completed = false;
    }

    /// Baby age in whole weeks, when a profile exists.
    pub fn baby_age_in_weeks(&self, today: NaiveDate) -> Option<u32> {
        self.baby.as_ref().map(|baby| baby.age_in_weeks(today))
    }

    /// Saves `item`, or unsaves it when its content id is already saved.
    ///
    /// Returns the new saved state.
    pub fn toggle_saved(&mut self, item: SavedItem) -> bool {
        if self.remove_saved(&item.content_id) {
            return false;
        }
        self.saved.push(item);
        true
    }

    pub fn is_saved(&self, content_id: &str) -> bool {
        self.saved.iter().any(|item| item.content_id == content_id)
    }

    /// Removes one saved item. Returns whether anything was removed.
    pub fn remove_saved(&mut self, content_id: &str) -> bool {
        let before = self.saved.len();
        self.saved.retain(|item| item.content_id != content_id);
        self.saved.len() != before
    }

    /// Saved items, newest first, optionally filtered by kind.
    ///
    /// Items saved on the same day keep most-recently-saved first.
    pub fn saved_items(&self, kind: Option<SavedKind>) -> Vec<&SavedItem> {
        let mut items: Vec<&SavedItem> = self
            .saved
            .iter()
            .rev()
            .filter(|item| kind.map_or(true, |wanted| item.kind == wanted))
            .collect();
        items.sort_by_key(|item| Reverse(item.saved_on));
        items
    }
}

#[cfg(test)]
mod tests {
    use super::AppContext;
    use crate::model::profile::{BabyProfile, SavedItem, SavedKind, UserAccount};
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, d).unwrap()
    }

    fn saved(id: &str, kind: SavedKind, on: u32) -> SavedItem {
        SavedItem {
            content_id: id.to_string(),
            kind,
            title: format!("title {id}"),
            saved_on: day(on),
        }
    }

    #[test]
    fn toggle_saved_flips_membership() {
        let mut ctx = AppContext::new();
        assert!(ctx.toggle_saved(saved("insight-1", SavedKind::Insight, 1)));
        assert!(ctx.is_saved("insight-1"));
        assert!(!ctx.toggle_saved(saved("insight-1", SavedKind::Insight, 2)));
        assert!(!ctx.is_saved("insight-1"));
    }

    #[test]
    fn saved_items_are_newest_first_and_filterable() {
        let mut ctx = AppContext::new();
        ctx.toggle_saved(saved("q-1", SavedKind::Question, 1));
        ctx.toggle_saved(saved("a-1", SavedKind::Activity, 3));
        ctx.toggle_saved(saved("q-2", SavedKind::Question, 3));

        let ids: Vec<&str> = ctx
            .saved_items(None)
            .iter()
            .map(|item| item.content_id.as_str())
            .collect();
        assert_eq!(ids, vec!["q-2", "a-1", "q-1"]);

        let questions = ctx.saved_items(Some(SavedKind::Question));
        assert_eq!(questions.len(), 2);
        assert!(questions.iter().all(|item| item.kind == SavedKind::Question));
    }

    #[test]
    fn onboarding_and_sign_out_lifecycle() {
        let mut ctx = AppContext::new();
        ctx.sign_in(UserAccount::new("parent@example.com", "Sam").unwrap());
        ctx.complete_onboarding(BabyProfile::new("Robin", day(1), None).unwrap());
        ctx.toggle_saved(saved("m-1", SavedKind::Milestone, 2));
        assert!(ctx.is_onboarding_completed());
        assert_eq!(ctx.baby_age_in_weeks(day(15)), Some(2));

        ctx.reset_onboarding();
        assert!(ctx.is_signed_in());
        assert!(!ctx.is_onboarding_completed());
        assert_eq!(ctx.baby(), None);

        ctx.sign_out();
        assert_eq!(ctx, AppContext::default());
    }
}
