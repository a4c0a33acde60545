//! # Property Search Repository
//!
//! This crate provides the provider interface for the hosted search index,
//! a concrete implementation for Algolia, the filter builder that turns a
//! structured search query into the provider's filter syntax, and the
//! `PropertyGateway` service the HTTP layer talks to.

pub mod algolia;
pub mod client;
pub mod config;
pub mod errors;
pub mod interfaces;

pub use algolia::AlgoliaClient;
pub use client::PropertyGateway;
pub use config::AlgoliaConfig;
pub use errors::{GatewayError, SearchIndexError};
pub use interfaces::SearchIndexProvider;
