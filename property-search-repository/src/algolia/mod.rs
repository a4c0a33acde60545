//! Algolia implementation of the search index provider.
//!
//! This module provides a concrete implementation of `SearchIndexProvider`
//! over the Algolia REST API, and the filter builder producing Algolia's
//! filter syntax.

mod client;
pub mod filters;
mod index_settings;

pub use client::AlgoliaClient;
pub use filters::{build_filter_expression, build_search_request};
pub use index_settings::get_index_settings;
