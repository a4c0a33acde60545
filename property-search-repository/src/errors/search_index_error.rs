//! Search index error types.
//!
//! This module defines the error types that can occur while talking to the
//! search provider.

use thiserror::Error;

/// Errors that can occur during search index operations.
#[derive(Debug, Clone, Error)]
pub enum SearchIndexError {
    /// Validation error (e.g., missing object ID).
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Failed to reach the search provider.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Failed to save a record.
    #[error("Save error: {0}")]
    SaveError(String),

    /// Failed to read a record.
    #[error("Get error: {0}")]
    GetError(String),

    /// Record not found.
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    /// Failed to delete a record.
    #[error("Delete error: {0}")]
    DeleteError(String),

    /// Search query execution failed.
    #[error("Query error: {0}")]
    QueryError(String),

    /// Failed to parse a response from the provider.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid provider configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl SearchIndexError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a save error.
    pub fn save(msg: impl Into<String>) -> Self {
        Self::SaveError(msg.into())
    }

    /// Create a get error.
    pub fn get(msg: impl Into<String>) -> Self {
        Self::GetError(msg.into())
    }

    /// Create a document not found error.
    pub fn document_not_found(object_id: &str) -> Self {
        Self::DocumentNotFound(format!("objectID={}", object_id))
    }

    /// Create a delete error.
    pub fn delete(msg: impl Into<String>) -> Self {
        Self::DeleteError(msg.into())
    }

    /// Create a query error.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
