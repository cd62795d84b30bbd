//! Bundled journey seed data.
//!
//! # Responsibility
//! - Embed the static phase/domain/milestone/activity document at build time.
//! - Parse it into [`Phase`] snapshots for [`crate::journey::tree::JourneyTree`].
//!
//! # Invariants
//! - The document `version` must equal [`SEED_VERSION`].
//! - Structural validation (ids, observation dates) happens in the tree
//!   builder, not here.

use crate::journey::error::JourneyError;
use crate::model::journey::Phase;
use serde::Deserialize;

/// Seed document version understood by this binary.
pub const SEED_VERSION: u32 = 1;

const JOURNEY_SEED_JSON: &str = include_str!("../../seed/journey_seed.json");

#[derive(Debug, Deserialize)]
struct SeedDocument {
    version: u32,
    phases: Vec<Phase>,
}

/// Parses the bundled seed document.
pub fn load_seed() -> Result<Vec<Phase>, JourneyError> {
    parse_seed(JOURNEY_SEED_JSON)
}

/// Parses one seed document.
pub fn parse_seed(raw: &str) -> Result<Vec<Phase>, JourneyError> {
    let document: SeedDocument =
        serde_json::from_str(raw).map_err(|err| JourneyError::InvalidSeed(err.to_string()))?;
    if document.version != SEED_VERSION {
        return Err(JourneyError::InvalidSeed(format!(
            "unsupported seed version {}; expected {SEED_VERSION}",
            document.version
        )));
    }
    Ok(document.phases)
}
