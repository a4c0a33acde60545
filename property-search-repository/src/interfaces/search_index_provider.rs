//! Search index provider trait definition.
//!
//! This module defines the abstract interface for the hosted search index,
//! allowing for different backend implementations (Algolia, test doubles, etc.).

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::SearchIndexError;
use property_search_shared::{PropertyRecord, ProviderSearchRequest};

/// Abstracts the hosted search index holding property records.
///
/// Implementations are injected into `PropertyGateway`. Responses are returned
/// as raw JSON because the gateway passes them through to its callers
/// unmodified.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use across async tasks.
#[async_trait]
pub trait SearchIndexProvider: Send + Sync {
    /// Create or replace the record stored under `record.object_id`.
    ///
    /// # Arguments
    ///
    /// * `record` - The canonical record to store
    ///
    /// # Returns
    ///
    /// * `Ok(Value)` - The provider's write acknowledgment
    /// * `Err(SearchIndexError)` - If the write fails
    async fn save_object(&self, record: &PropertyRecord) -> Result<Value, SearchIndexError>;

    /// Fetch the record stored under `object_id`.
    ///
    /// # Returns
    ///
    /// * `Ok(Value)` - The full record as stored by the provider
    /// * `Err(SearchIndexError::DocumentNotFound)` - If no such record exists
    /// * `Err(SearchIndexError)` - If the read fails
    async fn get_object(&self, object_id: &str) -> Result<Value, SearchIndexError>;

    /// Delete the record stored under `object_id`.
    ///
    /// # Returns
    ///
    /// * `Ok(Value)` - The provider's deletion acknowledgment
    /// * `Err(SearchIndexError)` - If the deletion fails
    async fn delete_object(&self, object_id: &str) -> Result<Value, SearchIndexError>;

    /// Run a search with a query string, a filter expression and pagination.
    ///
    /// # Returns
    ///
    /// * `Ok(Value)` - The raw provider response (hits, counts, facets)
    /// * `Err(SearchIndexError)` - If the search fails
    async fn search(&self, request: &ProviderSearchRequest) -> Result<Value, SearchIndexError>;

    /// Check if the index is reachable with the configured credentials.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the index answered successfully
    /// * `Ok(false)` - If the index answered with an error status
    /// * `Err(SearchIndexError)` - If the check could not be executed
    async fn health_check(&self) -> Result<bool, SearchIndexError>;
}
