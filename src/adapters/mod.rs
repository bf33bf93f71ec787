//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Chat-completion providers (OpenAI-compatible, mock)
//! - `storage` - Preference record storage (file, in-memory)
//! - `cli` - Command-line presentation

pub mod ai;
pub mod cli;
pub mod storage;

pub use ai::{MockAIProvider, OpenAIConfig, OpenAIProvider};
pub use storage::{FileMemoryStorage, InMemoryMemoryStorage};
