//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate journey state, app context and storage into use-case APIs.
//! - Keep UI/FFI layers decoupled from tree layout and storage details.

pub mod app_context;
pub mod journey_service;
pub mod session_store;
