//! Coaching module - prompt construction and response normalization.
//!
//! `CoachingPrompt::build` turns the relationship context and a draft into
//! model instructions; `normalize_response` turns the model's text back into
//! a `CoachingResult` without ever failing.

mod draft;
mod normalizer;
mod prompt;
mod result;

pub use draft::{CoachingFocus, ConversationDraft, ToneSetting};
pub use normalizer::{
    normalize_response, sanitize_block, MISSING_DIAGNOSIS, UNEXPECTED_FORMAT_DIAGNOSIS,
};
pub use prompt::{CoachingPrompt, COACHING_TEMPERATURE, SYSTEM_PROMPT};
pub use result::{CoachingResult, PerceptionInsight, ReplyOption, ResultSource};
