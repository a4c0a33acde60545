//! Property gateway implementation.
//!
//! This module provides the service the HTTP layer uses to save, read,
//! delete and search property records. Each operation is exactly one call to
//! the injected search provider.

use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::algolia::build_search_request;
use crate::errors::{GatewayError, SearchIndexError};
use crate::interfaces::SearchIndexProvider;
use property_search_shared::{PropertyRecord, SearchQuery};

/// The main entry point for property record operations.
pub struct PropertyGateway {
    provider: Box<dyn SearchIndexProvider>,
}

impl PropertyGateway {
    /// Create a new gateway over the given provider.
    pub fn new(provider: Box<dyn SearchIndexProvider>) -> Self {
        Self { provider }
    }

    /// Create or replace a property record.
    /// Input: PropertyRecord (objectID required; every other field optional)
    /// Output: Result<Value, GatewayError> (provider write acknowledgment)
    pub async fn upsert(&self, record: PropertyRecord) -> Result<Value, GatewayError> {
        if !record.has_object_id() {
            let err = SearchIndexError::validation("objectID is required");
            warn!(error = %err, "Rejected property without objectID");
            return Err(GatewayError::Upsert(err));
        }

        match self.provider.save_object(&record).await {
            Ok(ack) => {
                info!(object_id = %record.object_id, "Property saved");
                Ok(ack)
            }
            Err(e) => {
                error!(object_id = %record.object_id, error = %e, "Error saving property");
                Err(GatewayError::Upsert(e))
            }
        }
    }

    /// Fetch a property record by its object ID.
    /// Input: object ID (non-empty)
    /// Output: Result<Value, GatewayError> (the full stored record)
    ///
    /// Every failure, including transient provider errors, is reported as
    /// `GatewayError::NotFound`.
    pub async fn get(&self, object_id: &str) -> Result<Value, GatewayError> {
        if object_id.trim().is_empty() {
            return Err(GatewayError::NotFound(SearchIndexError::validation(
                "objectID is required",
            )));
        }

        self.provider.get_object(object_id).await.map_err(|e| {
            error!(object_id = %object_id, error = %e, "Error fetching property");
            GatewayError::NotFound(e)
        })
    }

    /// Delete a property record by its object ID.
    /// Input: object ID (non-empty)
    /// Output: Result<Value, GatewayError> (provider deletion acknowledgment)
    pub async fn delete(&self, object_id: &str) -> Result<Value, GatewayError> {
        if object_id.trim().is_empty() {
            return Err(GatewayError::Delete(SearchIndexError::validation(
                "objectID is required",
            )));
        }

        match self.provider.delete_object(object_id).await {
            Ok(ack) => {
                info!(object_id = %object_id, "Property deleted");
                Ok(ack)
            }
            Err(e) => {
                error!(object_id = %object_id, error = %e, "Error deleting property");
                Err(GatewayError::Delete(e))
            }
        }
    }

    /// Search property records.
    /// Input: SearchQuery (every field optional)
    /// Output: Result<Value, GatewayError> (raw provider response)
    pub async fn search(&self, query: &SearchQuery) -> Result<Value, GatewayError> {
        let request = build_search_request(query);
        debug!(
            query = %request.query,
            filters = %request.filters,
            page = request.page,
            hits_per_page = request.hits_per_page,
            "Built search request"
        );

        self.provider.search(&request).await.map_err(|e| {
            error!(filters = %request.filters, error = %e, "Error searching properties");
            GatewayError::Search(e)
        })
    }

    /// Check that the provider is reachable.
    pub async fn health_check(&self) -> Result<bool, SearchIndexError> {
        self.provider.health_check().await
    }
}
