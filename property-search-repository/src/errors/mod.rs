//! Error types for the property search repository.

mod gateway_error;
mod search_index_error;

pub use gateway_error::GatewayError;
pub use search_index_error::SearchIndexError;
