//! # Property Search
//!
//! HTTP gateway for property listings stored in a hosted search index.
//!
//! This crate provides the configuration, dependency wiring and axum router
//! for the gateway binary.

pub mod config;
pub mod http;

pub use config::{AppConfig, Dependencies};
pub use http::build_router;

use property_search_repository::SearchIndexError;
use thiserror::Error;

/// Errors that can occur while starting or running the server.
#[derive(Error, Debug)]
pub enum StartupError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Search index error.
    #[error("Search index error: {0}")]
    SearchIndexError(#[from] SearchIndexError),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl StartupError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
