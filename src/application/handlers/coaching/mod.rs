//! Coaching command handlers.

mod request_coaching;

pub use request_coaching::{CoachingError, RequestCoachingCommand, RequestCoachingHandler};
