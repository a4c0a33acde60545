//! Configuration types for the Algolia provider.

/// Default name of the index holding property records.
pub const DEFAULT_INDEX_NAME: &str = "properties";

/// Connection settings for an Algolia application.
#[derive(Clone)]
pub struct AlgoliaConfig {
    /// Algolia application ID.
    pub app_id: String,
    /// API key with read and write access to the index.
    pub api_key: String,
    /// Name of the index holding property records.
    pub index_name: String,
    /// Base URL replacing the default Algolia hosts for every call.
    /// Used for proxies and local test doubles.
    pub host: Option<String>,
}

impl AlgoliaConfig {
    /// Create a config for the default index.
    pub fn new(app_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            api_key: api_key.into(),
            index_name: DEFAULT_INDEX_NAME.to_string(),
            host: None,
        }
    }

    /// Use a different index.
    pub fn with_index_name(mut self, index_name: impl Into<String>) -> Self {
        self.index_name = index_name.into();
        self
    }

    /// Send every call to the given base URL.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Base URL for write operations.
    pub fn write_host(&self) -> String {
        match &self.host {
            Some(host) => host.trim_end_matches('/').to_string(),
            None => format!("https://{}.algolia.net", self.app_id),
        }
    }

    /// Base URL for read operations (search, get, settings).
    pub fn read_host(&self) -> String {
        match &self.host {
            Some(host) => host.trim_end_matches('/').to_string(),
            None => format!("https://{}-dsn.algolia.net", self.app_id),
        }
    }
}

// The API key must never reach the logs.
impl std::fmt::Debug for AlgoliaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlgoliaConfig")
            .field("app_id", &self.app_id)
            .field("api_key", &"<redacted>")
            .field("index_name", &self.index_name)
            .field("host", &self.host)
            .finish()
    }
}
