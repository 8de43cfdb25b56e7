//! Service traits for the external data collaborators
//!
//! Views fetch raw records through a [`DataSource`] before handing them to
//! the list engine, and push selection or edit results through a
//! [`MutationSink`]. No retry or timeout policy is applied here; that belongs
//! to the implementation.

use crate::core::error::SourceError;
use crate::core::query::QueryParams;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A page of raw records as returned by a data source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub items: Vec<Value>,
    pub total: usize,
}

/// Source of raw records
#[async_trait]
pub trait DataSource: Send + Sync {
    /// List records of a collection
    async fn list(&self, collection: &str, params: &QueryParams) -> Result<Listing, SourceError>;
}

/// Sink for submitted changes (role assignments, KPI values, deletions)
#[async_trait]
pub trait MutationSink: Send + Sync {
    /// Submit a payload for an entity
    async fn submit(&self, entity_id: &str, payload: Value) -> Result<(), SourceError>;
}
