//! property-search — HTTP gateway for property listings.
//!
//! Reads config from env vars (optionally from a `.env` file); see
//! `AppConfig::from_env` for the full list.

use tokio::net::TcpListener;
use tracing::info;

use property_search::config::init_tracing;
use property_search::{build_router, AppConfig, Dependencies, StartupError};

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    dotenv::dotenv().ok();

    let config = AppConfig::from_env()?;
    init_tracing(config.log_format);

    let dependencies = Dependencies::new(&config).await?;
    let app = build_router(dependencies.gateway);

    let bind_addr = config.bind_address();
    let listener = TcpListener::bind(&bind_addr).await?;
    info!(address = %bind_addr, "Server is running");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
