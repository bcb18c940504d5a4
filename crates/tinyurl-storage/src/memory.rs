use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::collections::HashMap;
use tinyurl_core::repository::{ReadRepository, Repository, Result};
use tinyurl_core::{ShortCode, StorageError};

/// In-memory implementation of the Repository trait using DashMap.
///
/// DashMap shards its locks, so concurrent requests touching different
/// codes don't block each other. Inserts go through the entry API and are
/// therefore atomic per code, mirroring a primary key constraint.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    storage: DashMap<String, String>,
}

impl InMemoryRepository {
    /// Creates a new in-memory repository.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    /// Creates a new in-memory repository with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: DashMap::with_capacity(capacity),
        }
    }

    /// Number of stored mappings.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn get(&self, code: &ShortCode) -> Result<Option<String>> {
        Ok(self
            .storage
            .get(code.as_str())
            .map(|entry| entry.value().clone()))
    }

    async fn find_by_url(&self, full_url: &str) -> Result<Option<ShortCode>> {
        Ok(self
            .storage
            .iter()
            .find(|entry| entry.value() == full_url)
            .map(|entry| ShortCode::new_unchecked(entry.key().as_str())))
    }

    async fn list(&self) -> Result<HashMap<String, ShortCode>> {
        Ok(self
            .storage
            .iter()
            .map(|entry| {
                (
                    entry.value().clone(),
                    ShortCode::new_unchecked(entry.key().as_str()),
                )
            })
            .collect())
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn insert(&self, code: &ShortCode, full_url: &str) -> Result<()> {
        match self.storage.entry(code.as_str().to_owned()) {
            Entry::Occupied(_) => Err(StorageError::Conflict(code.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(full_url.to_owned());
                Ok(())
            }
        }
    }
}
