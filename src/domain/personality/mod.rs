//! Personality module - the static profile catalog.
//!
//! Pure lookup over a closed set of sixteen codes grouped into four quadrants.

mod catalog;
mod code;

pub use catalog::{list_groups, lookup, profile, PersonalityProfile, QuadrantGroup};
pub use code::{PersonalityCode, Quadrant};
