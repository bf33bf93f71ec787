//! Application layer - Services and command handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;
pub mod preference_store;

pub use handlers::coaching::{CoachingError, RequestCoachingCommand, RequestCoachingHandler};
pub use preference_store::{PreferenceStore, StoreNotice, StoreStatus, DEFAULT_DEBOUNCE};
