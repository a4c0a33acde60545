//! Gateway error types.
//!
//! Every provider failure is folded into one error per gateway operation.
//! Any failure while reading a record is reported as `NotFound`, whatever
//! the provider actually said.

use thiserror::Error;

use super::SearchIndexError;

/// Errors returned by `PropertyGateway` operations.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    /// Saving a record failed.
    #[error("Failed to save property: {0}")]
    Upsert(SearchIndexError),

    /// Reading a record failed for any reason.
    #[error("Property not found: {0}")]
    NotFound(SearchIndexError),

    /// Deleting a record failed.
    #[error("Failed to delete property: {0}")]
    Delete(SearchIndexError),

    /// Executing a search failed.
    #[error("Failed to search properties: {0}")]
    Search(SearchIndexError),
}

impl GatewayError {
    /// The underlying provider error.
    pub fn cause(&self) -> &SearchIndexError {
        match self {
            GatewayError::Upsert(e)
            | GatewayError::NotFound(e)
            | GatewayError::Delete(e)
            | GatewayError::Search(e) => e,
        }
    }
}
