//! Storage backends for tinyurl mappings.

pub mod memory;
pub mod sqlite;

pub use memory::InMemoryRepository;
pub use sqlite::SqliteRepository;
pub use tinyurl_core::repository::{ReadRepository, Repository, Result};
pub use tinyurl_core::StorageError;
