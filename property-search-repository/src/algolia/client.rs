//! Algolia client implementation.
//!
//! This module provides the concrete implementation of `SearchIndexProvider`
//! over the Algolia REST API (v1), using `reqwest`.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Response, StatusCode};
use serde_json::Value;
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::algolia::index_settings::get_index_settings;
use crate::config::AlgoliaConfig;
use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexProvider;
use property_search_shared::{PropertyRecord, ProviderSearchRequest};

const APPLICATION_ID_HEADER: &str = "x-algolia-application-id";
const API_KEY_HEADER: &str = "x-algolia-api-key";

/// Algolia client implementation.
///
/// Writes go to the primary host, reads to the distributed search host,
/// unless the config overrides both.
///
/// # Example
///
/// ```ignore
/// let config = AlgoliaConfig::new("APP_ID", "API_KEY");
/// let client = AlgoliaClient::new(config)?;
///
/// let ack = client.save_object(&PropertyRecord::new("prop-1")).await?;
/// ```
pub struct AlgoliaClient {
    http: reqwest::Client,
    config: AlgoliaConfig,
}

impl AlgoliaClient {
    /// Create a new client for the configured application and index.
    ///
    /// # Returns
    ///
    /// * `Ok(AlgoliaClient)` - A new client instance
    /// * `Err(SearchIndexError)` - If the credentials cannot be used as headers
    ///   or the HTTP client cannot be built
    pub fn new(config: AlgoliaConfig) -> Result<Self, SearchIndexError> {
        if config.app_id.trim().is_empty() {
            return Err(SearchIndexError::config("Algolia application ID is empty"));
        }
        if config.index_name.trim().is_empty() {
            return Err(SearchIndexError::config("Algolia index name is empty"));
        }

        let http = reqwest::Client::builder()
            .default_headers(Self::default_headers(&config)?)
            .build()
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        // Fail early on a host override that is not a URL
        Self::index_url(&config.write_host(), &config.index_name, &[])?;

        info!(
            app_id = %config.app_id,
            index = %config.index_name,
            host = ?config.host,
            "Created Algolia client"
        );

        Ok(Self { http, config })
    }

    /// Credential and content-type headers sent with every request.
    fn default_headers(config: &AlgoliaConfig) -> Result<HeaderMap, SearchIndexError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            APPLICATION_ID_HEADER,
            HeaderValue::from_str(&config.app_id)
                .map_err(|e| SearchIndexError::config(format!("Invalid application ID: {}", e)))?,
        );
        let mut api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|e| SearchIndexError::config(format!("Invalid API key: {}", e)))?;
        api_key.set_sensitive(true);
        headers.insert(API_KEY_HEADER, api_key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    /// Name of the index this client talks to.
    pub fn index_name(&self) -> &str {
        &self.config.index_name
    }

    /// Apply the property index settings (faceting for filtered attributes).
    ///
    /// Intended to be called once at startup when the index is managed by
    /// this service.
    #[instrument(skip(self), fields(index = %self.config.index_name))]
    pub async fn apply_index_settings(&self) -> Result<(), SearchIndexError> {
        let url = Self::index_url(&self.config.write_host(), &self.config.index_name, &["settings"])?;

        let response = self
            .http
            .put(url)
            .json(&get_index_settings())
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let ack = Self::read_json(response, SearchIndexError::config).await?;
        info!(ack = %ack, "Applied index settings");
        Ok(())
    }

    /// Build `{host}/1/indexes/{index}[/{segment}...]`.
    ///
    /// Every path segment is percent-encoded so an object ID cannot address a
    /// different resource.
    fn index_url(host: &str, index_name: &str, segments: &[&str]) -> Result<Url, SearchIndexError> {
        let mut path = format!(
            "{}/1/indexes/{}",
            host.trim_end_matches('/'),
            urlencoding::encode(index_name)
        );
        for segment in segments {
            path.push('/');
            path.push_str(&urlencoding::encode(segment));
        }

        Url::parse(&path).map_err(|e| SearchIndexError::config(format!("Invalid URL {}: {}", path, e)))
    }

    /// URL of a single record.
    ///
    /// `.` and `..` would be normalized away by URL parsing, so they are
    /// rejected as object IDs.
    fn object_url(&self, host: &str, object_id: &str) -> Result<Url, SearchIndexError> {
        if object_id.is_empty() || object_id == "." || object_id == ".." {
            return Err(SearchIndexError::validation(format!(
                "Invalid objectID: {:?}",
                object_id
            )));
        }
        Self::index_url(host, &self.config.index_name, &[object_id])
    }

    /// Read a JSON body from a successful response, or turn an error status
    /// into the given error kind.
    async fn read_json(
        response: Response,
        on_error: fn(String) -> SearchIndexError,
    ) -> Result<Value, SearchIndexError> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Algolia request failed");
            return Err(on_error(format!(
                "Algolia returned {}: {}",
                status,
                Self::error_message(&body)
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))
    }

    /// Algolia error bodies look like `{"message": "...", "status": 404}`.
    /// Fall back to the raw body for anything else.
    fn error_message(body: &str) -> String {
        serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
            .unwrap_or_else(|| body.to_string())
    }
}

#[async_trait]
impl SearchIndexProvider for AlgoliaClient {
    /// Create or replace a record.
    ///
    /// API reference: `PUT /1/indexes/{indexName}/{objectID}`
    #[instrument(skip(self, record), fields(object_id = %record.object_id))]
    async fn save_object(&self, record: &PropertyRecord) -> Result<Value, SearchIndexError> {
        let url = self.object_url(&self.config.write_host(), &record.object_id)?;

        let response = self
            .http
            .put(url)
            .json(record)
            .send()
            .await
            .map_err(|e| SearchIndexError::save(e.to_string()))?;

        let ack = Self::read_json(response, SearchIndexError::save).await?;
        debug!("Record saved");
        Ok(ack)
    }

    /// Fetch a record.
    ///
    /// API reference: `GET /1/indexes/{indexName}/{objectID}`
    #[instrument(skip(self))]
    async fn get_object(&self, object_id: &str) -> Result<Value, SearchIndexError> {
        let url = self.object_url(&self.config.read_host(), object_id)?;

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| SearchIndexError::get(e.to_string()))?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!("Record not found");
            return Err(SearchIndexError::document_not_found(object_id));
        }

        Self::read_json(response, SearchIndexError::get).await
    }

    /// Delete a record.
    ///
    /// API reference: `DELETE /1/indexes/{indexName}/{objectID}`
    #[instrument(skip(self))]
    async fn delete_object(&self, object_id: &str) -> Result<Value, SearchIndexError> {
        let url = self.object_url(&self.config.write_host(), object_id)?;

        let response = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(|e| SearchIndexError::delete(e.to_string()))?;

        let ack = Self::read_json(response, SearchIndexError::delete).await?;
        debug!("Record deleted");
        Ok(ack)
    }

    /// Search the index.
    ///
    /// API reference: `POST /1/indexes/{indexName}/query`
    #[instrument(skip(self, request), fields(page = request.page, hits_per_page = request.hits_per_page))]
    async fn search(&self, request: &ProviderSearchRequest) -> Result<Value, SearchIndexError> {
        let url = Self::index_url(&self.config.read_host(), &self.config.index_name, &["query"])?;

        let response = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| SearchIndexError::query(e.to_string()))?;

        Self::read_json(response, SearchIndexError::query).await
    }

    /// Reads the index settings; any 2xx means the index is usable.
    async fn health_check(&self) -> Result<bool, SearchIndexError> {
        let url = Self::index_url(&self.config.read_host(), &self.config.index_name, &["settings"])?;

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        Ok(response.status().is_success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Path;
    use axum::http::StatusCode as StubStatus;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use serde_json::json;

    /// Serve canned Algolia responses on a local port and return its base URL.
    async fn spawn_stub_algolia() -> String {
        let app = Router::new()
            .route(
                "/1/indexes/:index/query",
                post(|| async {
                    (
                        StubStatus::FORBIDDEN,
                        Json(json!({"message": "Invalid Application-ID or API key", "status": 403})),
                    )
                }),
            )
            .route(
                "/1/indexes/:index/:object_id",
                get(|Path((_, object_id)): Path<(String, String)>| async move {
                    if object_id == "prop-1" {
                        (StubStatus::OK, Json(json!({"objectID": "prop-1", "propertyName": "Loft"})))
                    } else {
                        (
                            StubStatus::NOT_FOUND,
                            Json(json!({"message": "ObjectID does not exist", "status": 404})),
                        )
                    }
                })
                .delete(|| async { (StubStatus::BAD_GATEWAY, "upstream unavailable") }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}", addr)
    }

    /// A client pointed at the stub. Proxies are bypassed so a proxy set in
    /// the environment cannot intercept loopback traffic.
    fn stub_client(host: &str) -> AlgoliaClient {
        let config = AlgoliaConfig::new("APP123", "secret").with_host(host);
        let http = reqwest::Client::builder()
            .no_proxy()
            .default_headers(AlgoliaClient::default_headers(&config).unwrap())
            .build()
            .unwrap();
        AlgoliaClient { http, config }
    }

    #[tokio::test]
    async fn test_get_object_returns_provider_record() {
        let client = stub_client(&spawn_stub_algolia().await);

        let record = client.get_object("prop-1").await.unwrap();

        assert_eq!(record, json!({"objectID": "prop-1", "propertyName": "Loft"}));
    }

    #[tokio::test]
    async fn test_get_object_maps_404_to_document_not_found() {
        let client = stub_client(&spawn_stub_algolia().await);

        let err = client.get_object("missing").await.unwrap_err();

        assert!(matches!(err, SearchIndexError::DocumentNotFound(ref id) if id == "objectID=missing"));
    }

    #[tokio::test]
    async fn test_error_status_carries_provider_message() {
        let client = stub_client(&spawn_stub_algolia().await);
        let request = ProviderSearchRequest {
            query: "Villa".to_string(),
            filters: String::new(),
            page: 0,
            hits_per_page: 20,
        };

        let err = client.search(&request).await.unwrap_err();

        match err {
            SearchIndexError::QueryError(msg) => {
                assert!(msg.contains("403"), "unexpected message: {}", msg);
                assert!(msg.ends_with("Invalid Application-ID or API key"));
            }
            other => panic!("expected QueryError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_error_status_with_plain_body() {
        let client = stub_client(&spawn_stub_algolia().await);

        let err = client.delete_object("prop-1").await.unwrap_err();

        match err {
            SearchIndexError::DeleteError(msg) => {
                assert!(msg.contains("502"), "unexpected message: {}", msg);
                assert!(msg.ends_with("upstream unavailable"));
            }
            other => panic!("expected DeleteError, got {:?}", other),
        }
    }

    fn test_client() -> AlgoliaClient {
        AlgoliaClient::new(AlgoliaConfig::new("APP123", "secret")).unwrap()
    }

    #[test]
    fn test_index_url() {
        let url = AlgoliaClient::index_url("https://APP123-dsn.algolia.net", "properties", &["query"])
            .unwrap();

        assert_eq!(url.as_str(), "https://APP123-dsn.algolia.net/1/indexes/properties/query");
    }

    #[test]
    fn test_object_url_encodes_object_id() {
        let client = test_client();

        let url = client
            .object_url("https://APP123.algolia.net", "villa/../settings?x=1")
            .unwrap();

        assert_eq!(
            url.as_str(),
            "https://APP123.algolia.net/1/indexes/properties/villa%2F..%2Fsettings%3Fx%3D1"
        );
    }

    #[test]
    fn test_object_url_rejects_dot_segments() {
        let client = test_client();

        for object_id in ["", ".", ".."] {
            let result = client.object_url("https://APP123.algolia.net", object_id);
            assert!(matches!(result, Err(SearchIndexError::ValidationError(_))));
        }
    }

    #[test]
    fn test_host_override_applies_to_reads_and_writes() {
        let config = AlgoliaConfig::new("APP123", "secret").with_host("http://localhost:9999/");
        let client = AlgoliaClient::new(config).unwrap();

        let read = client.object_url(&client.config.read_host(), "prop-1").unwrap();
        let write = client.object_url(&client.config.write_host(), "prop-1").unwrap();

        assert_eq!(read.as_str(), "http://localhost:9999/1/indexes/properties/prop-1");
        assert_eq!(read, write);
    }

    #[test]
    fn test_new_rejects_bad_config() {
        assert!(matches!(
            AlgoliaClient::new(AlgoliaConfig::new("", "secret")),
            Err(SearchIndexError::ConfigError(_))
        ));
        assert!(matches!(
            AlgoliaClient::new(AlgoliaConfig::new("APP123", "bad\nkey")),
            Err(SearchIndexError::ConfigError(_))
        ));
        assert!(matches!(
            AlgoliaClient::new(AlgoliaConfig::new("APP123", "secret").with_host("not a url")),
            Err(SearchIndexError::ConfigError(_))
        ));
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            AlgoliaClient::error_message(r#"{"message":"ObjectID does not exist","status":404}"#),
            "ObjectID does not exist"
        );
        assert_eq!(AlgoliaClient::error_message("Bad gateway"), "Bad gateway");
        assert_eq!(AlgoliaClient::error_message(""), "");
    }
}
