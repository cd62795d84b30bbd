//! Derived journey percentages.
//!
//! All functions are pure and recompute from the current flags. Nothing here
//! caches.

use crate::model::journey::{Domain, Milestone};

/// Rounds `100 * part / total` half-up to a whole percentage.
///
/// Returns 0 when `total == 0`. `part` is clamped to `total`.
pub fn percentage(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let part = part.min(total) as u64;
    let total = total as u64;
    // floor(100 * part / total + 1/2) in integers.
    let rounded = (200 * part + total) / (2 * total);
    u8::try_from(rounded).unwrap_or(100)
}

/// Percentage of set flags. An empty sequence yields 0.
pub fn flag_share(flags: impl IntoIterator<Item = bool>) -> u8 {
    let (set, total) = flags
        .into_iter()
        .fold((0, 0), |(set, total), flag| (set + usize::from(flag), total + 1));
    percentage(set, total)
}

/// Share of a domain's milestones marked observed.
pub fn domain_progress(domain: &Domain) -> u8 {
    flag_share(domain.milestones.iter().map(|milestone| milestone.observed))
}

/// Share of a milestone's activities marked completed.
pub fn activity_completion(milestone: &Milestone) -> u8 {
    flag_share(milestone.activities.iter().map(|activity| activity.completed))
}
