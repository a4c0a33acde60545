//! HTTP surface of the gateway.
//!
//! GET    /                       — plain-text banner
//! GET    /health                 — provider reachability
//! POST   /api/properties         — create or replace a property
//! POST   /api/properties/search  — structured search
//! GET    /api/properties/:id     — fetch a property
//! DELETE /api/properties/:id     — delete a property

mod handlers;
mod response;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use property_search_repository::PropertyGateway;

pub use response::{ApiError, ErrorEnvelope};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<PropertyGateway>,
}

/// Build the axum router with all routes and middleware.
pub fn build_router(gateway: Arc<PropertyGateway>) -> Router {
    Router::new()
        .route("/", get(handlers::banner))
        .route("/health", get(handlers::health))
        .route("/api/properties", post(handlers::upsert_property))
        .route("/api/properties/search", post(handlers::search_properties))
        .route(
            "/api/properties/:id",
            get(handlers::get_property).delete(handlers::delete_property),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { gateway })
}
