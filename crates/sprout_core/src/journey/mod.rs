//! Journey milestone/activity tracking.
//!
//! # Responsibility
//! - Own the phase → domain → milestone → activity tree and its toggle
//!   operations.
//! - Derive progress metrics and drive the domain card view-mode cycle.
//!
//! # Invariants
//! - Every domain's stored progress equals the observed-milestone
//!   percentage after every mutation.
//! - Unresolved ids never mutate the tree.

pub mod error;
pub mod gesture;
pub mod metrics;
pub mod seed;
pub mod selection;
pub mod tree;
pub mod view_mode;
