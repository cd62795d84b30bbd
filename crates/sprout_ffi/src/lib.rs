//! Flutter-facing bridge for the Sprout client core.

pub mod api;
