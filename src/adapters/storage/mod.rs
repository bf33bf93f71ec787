//! Storage Adapters
//!
//! Implementations of the MemoryStorage port for persisting the preference record.
//!
//! ## Available Adapters
//!
//! - **FileMemoryStorage** - Stores the record as a JSON file on disk
//! - **InMemoryMemoryStorage** - Stores the record in memory (testing)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileMemoryStorage, InMemoryMemoryStorage};
//!
//! let storage = FileMemoryStorage::new(".reply-coach");
//! let storage = InMemoryMemoryStorage::new();
//! ```

mod file_memory_storage;
mod in_memory_memory_storage;

pub use file_memory_storage::FileMemoryStorage;
pub use in_memory_memory_storage::InMemoryMemoryStorage;
