//! Foundation module - Shared domain primitives.
//!
//! Contains the value objects and error types that the personality,
//! memory and coaching modules build on.

mod errors;
mod timestamp;

pub use errors::ValidationError;
pub use timestamp::Timestamp;
