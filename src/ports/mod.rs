//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - The hosted chat-completion endpoint
//! - `MemoryStorage` - Durable storage for the preference record

mod ai_provider;
mod memory_storage;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, RequestMetadata,
};
pub use memory_storage::{MemoryStorage, StorageError};
