use crate::error::StorageError;
use crate::shortcode::ShortCode;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A persisted binding between a short code and the URL it stands for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mapping {
    pub full_url: String,
    pub short_code: ShortCode,
}

/// A read-only view of a repository.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves the full URL stored under the given short code.
    /// Returns `None` if the code does not exist.
    async fn get(&self, code: &ShortCode) -> Result<Option<String>>;

    /// Retrieves the short code already bound to `full_url`, if any.
    async fn find_by_url(&self, full_url: &str) -> Result<Option<ShortCode>>;

    /// Returns every binding keyed by full URL. Order is unspecified.
    async fn list(&self) -> Result<HashMap<String, ShortCode>>;
}

#[async_trait]
pub trait Repository: ReadRepository {
    /// Inserts a new binding. Returns `Err(Conflict)` if the code already exists.
    async fn insert(&self, code: &ShortCode, full_url: &str) -> Result<()>;

    /// Releases the underlying storage handle.
    ///
    /// Must be called once, on shutdown. Operations issued afterwards fail
    /// with `Unavailable`.
    async fn close(&self) {}
}
