//! Repository layer over local SQLite storage.
//!
//! # Responsibility
//! - Define storage contracts used by services.
//! - Isolate SQL from service orchestration.
//!
//! # Invariants
//! - Repositories refuse connections that are not fully migrated.

pub mod kv_repo;
