//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (errors, timestamps)
//! - `personality` - Static personality catalog and quadrant grouping
//! - `memory` - The persisted relationship context and first-run form
//! - `coaching` - Drafts, prompt rendering and model-output normalization

pub mod coaching;
pub mod foundation;
pub mod memory;
pub mod personality;
