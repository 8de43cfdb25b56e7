//! In-memory collaborators for testing and development

use crate::core::error::SourceError;
use crate::core::query::QueryParams;
use crate::core::service::{DataSource, Listing, MutationSink};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

fn lock_poisoned(e: impl std::fmt::Display) -> SourceError {
    SourceError::Unavailable {
        message: format!("Failed to acquire lock: {}", e),
    }
}

/// In-memory data source
///
/// Returns whole collections; filtering and paging happen client-side in the
/// list engine. Uses RwLock for thread-safe access.
#[derive(Clone, Default)]
pub struct InMemoryDataSource {
    collections: Arc<RwLock<HashMap<String, Vec<Value>>>>,
}

impl InMemoryDataSource {
    /// Create an empty in-memory data source
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the records of a collection
    pub fn insert_collection(&self, name: impl Into<String>, records: Vec<Value>) -> Result<(), SourceError> {
        let mut collections = self.collections.write().map_err(lock_poisoned)?;
        collections.insert(name.into(), records);
        Ok(())
    }

    /// Append a record, creating the collection if needed
    pub fn push(&self, name: &str, record: Value) -> Result<(), SourceError> {
        let mut collections = self.collections.write().map_err(lock_poisoned)?;
        collections.entry(name.to_string()).or_default().push(record);
        Ok(())
    }
}

#[async_trait]
impl DataSource for InMemoryDataSource {
    async fn list(&self, collection: &str, _params: &QueryParams) -> Result<Listing, SourceError> {
        let collections = self.collections.read().map_err(lock_poisoned)?;
        let items = collections
            .get(collection)
            .cloned()
            .ok_or_else(|| SourceError::NotFound {
                collection: collection.to_string(),
            })?;

        Ok(Listing {
            total: items.len(),
            items,
        })
    }
}

/// A recorded submission
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub entity_id: String,
    pub payload: Value,
}

/// In-memory mutation sink that records submissions
///
/// `fail_with` makes every following submission fail with the given message.
#[derive(Clone, Default)]
pub struct InMemoryMutationSink {
    submissions: Arc<RwLock<Vec<Submission>>>,
    failure: Arc<RwLock<Option<String>>>,
}

impl InMemoryMutationSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject subsequent submissions with `message`, or accept again with `None`
    pub fn fail_with(&self, message: Option<&str>) -> Result<(), SourceError> {
        let mut failure = self.failure.write().map_err(lock_poisoned)?;
        *failure = message.map(str::to_string);
        Ok(())
    }

    /// Accepted submissions, oldest first
    pub fn submissions(&self) -> Result<Vec<Submission>, SourceError> {
        let submissions = self.submissions.read().map_err(lock_poisoned)?;
        Ok(submissions.clone())
    }
}

#[async_trait]
impl MutationSink for InMemoryMutationSink {
    async fn submit(&self, entity_id: &str, payload: Value) -> Result<(), SourceError> {
        if let Some(message) = self.failure.read().map_err(lock_poisoned)?.clone() {
            return Err(SourceError::Rejected {
                entity_id: entity_id.to_string(),
                message,
            });
        }

        let mut submissions = self.submissions.write().map_err(lock_poisoned)?;
        submissions.push(Submission {
            entity_id: entity_id.to_string(),
            payload,
        });
        Ok(())
    }
}
