//! Domain model for the parenting client core.
//!
//! # Responsibility
//! - Define canonical data structures shared by journey logic, app context
//!   and the FFI layer.
//!
//! # Invariants
//! - Journey snapshots are value types; the arena in `journey::tree` owns the
//!   mutable state.
//! - Profile records carry no secrets; auth is mocked by the shell.

pub mod journey;
pub mod profile;
