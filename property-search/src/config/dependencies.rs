//! Dependency initialization and wiring for the gateway.

use std::sync::Arc;
use tracing::{info, warn};

use super::AppConfig;
use crate::StartupError;
use property_search_repository::{AlgoliaClient, PropertyGateway, SearchIndexProvider};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The gateway shared by every request handler.
    pub gateway: Arc<PropertyGateway>,
}

impl Dependencies {
    /// Initialize all dependencies from the loaded configuration.
    ///
    /// The provider client is created once here and lives for the whole
    /// process. An unreachable index is logged but does not stop startup,
    /// since requests report provider failures on their own.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(StartupError)` - If the provider client cannot be created, or
    ///   index settings were requested and could not be applied
    pub async fn new(config: &AppConfig) -> Result<Self, StartupError> {
        info!(
            app_id = %config.algolia.app_id,
            index = %config.algolia.index_name,
            "Initializing dependencies"
        );

        let search_client = AlgoliaClient::new(config.algolia.clone())
            .map_err(|e| StartupError::config(format!("Failed to create Algolia client: {}", e)))?;

        if config.configure_index {
            search_client.apply_index_settings().await?;
        }

        match search_client.health_check().await {
            Ok(true) => info!("Algolia index reachable"),
            Ok(false) => warn!("Algolia index answered with an error status"),
            Err(e) => warn!(error = %e, "Algolia health check failed"),
        }

        let gateway = PropertyGateway::new(Box::new(search_client));

        Ok(Self {
            gateway: Arc::new(gateway),
        })
    }
}
