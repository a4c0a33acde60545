//! Process configuration read from the environment.

use std::env;

use property_search_repository::config::DEFAULT_INDEX_NAME;
use property_search_repository::AlgoliaConfig;

use super::LogFormat;
use crate::StartupError;

/// Default bind address.
const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listening port.
const DEFAULT_PORT: u16 = 3000;

/// Everything the server needs to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Search provider connection settings.
    pub algolia: AlgoliaConfig,
    /// Address to bind.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Log line format.
    pub log_format: LogFormat,
    /// Push index settings to the provider at startup.
    pub configure_index: bool,
}

impl AppConfig {
    /// Read configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `ALGOLIA_APP_ID`: Algolia application ID (required)
    /// - `ALGOLIA_API_KEY`: Algolia API key (required)
    /// - `ALGOLIA_INDEX_NAME`: index holding property records (default: properties)
    /// - `ALGOLIA_HOST`: base URL replacing the Algolia hosts (optional)
    /// - `ALGOLIA_CONFIGURE_INDEX`: `true` to apply index settings at startup (default: false)
    /// - `HOST`: bind address (default: 0.0.0.0)
    /// - `PORT`: listening port (default: 3000)
    /// - `LOG_FORMAT`: `json` or `pretty` (default: pretty)
    pub fn from_env() -> Result<Self, StartupError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StartupError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let require = |key: &str| {
            get(key).ok_or_else(|| StartupError::config(format!("{} must be set", key)))
        };

        let mut algolia = AlgoliaConfig::new(require("ALGOLIA_APP_ID")?, require("ALGOLIA_API_KEY")?)
            .with_index_name(
                get("ALGOLIA_INDEX_NAME").unwrap_or_else(|| DEFAULT_INDEX_NAME.to_string()),
            );
        if let Some(host) = get("ALGOLIA_HOST") {
            algolia = algolia.with_host(host);
        }

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| StartupError::config(format!("Invalid PORT {:?}: {}", raw, e)))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            algolia,
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            log_format: get("LOG_FORMAT")
                .map(|value| LogFormat::parse(&value))
                .unwrap_or_default(),
            configure_index: get("ALGOLIA_CONFIGURE_INDEX")
                .map(|value| matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        })
    }

    /// `host:port` to bind the listener to.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
