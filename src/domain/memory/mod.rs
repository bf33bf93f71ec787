//! Memory module - the persisted relationship context.
//!
//! `PreferenceSnapshot` is the single record kept across runs; patches merge
//! into it field by field. `SetupForm` is the first-run form that fills it in.

mod setup;
mod snapshot;

pub use setup::SetupForm;
pub use snapshot::{PreferencePatch, PreferenceSnapshot, DEFAULT_RELATIONSHIP_TAG, STORAGE_KEY};
