//! Request handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::warn;

use super::response::{
    ApiError, PropertyResponse, SearchResponse, WriteResponse, SEARCH_FAILED, UPSERT_FAILED,
};
use super::AppState;
use property_search_shared::{PropertyRecord, SearchQuery};

const BANNER: &str = "This is Search Property Server!";

/// GET /
pub async fn banner() -> &'static str {
    BANNER
}

/// GET /health
///
/// 503 when the search index cannot be reached.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.gateway.health_check().await {
        Ok(true) => (StatusCode::OK, Json(json!({"status": "ok"}))),
        Ok(false) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({"status": "unavailable", "error": "index returned an error status"})),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({"status": "unavailable", "error": e.to_string()})),
        ),
    }
}

/// POST /api/properties
pub async fn upsert_property(
    State(state): State<AppState>,
    payload: Result<Json<PropertyRecord>, JsonRejection>,
) -> Result<(StatusCode, Json<WriteResponse>), ApiError> {
    let Json(record) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "Rejected property payload");
        ApiError::rejected_body(UPSERT_FAILED, rejection)
    })?;

    let result = state.gateway.upsert(record).await?;

    Ok((
        StatusCode::CREATED,
        Json(WriteResponse::new("Property added to search index successfully", result)),
    ))
}

/// GET /api/properties/:id
pub async fn get_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PropertyResponse>, ApiError> {
    let property = state.gateway.get(&id).await?;

    Ok(Json(PropertyResponse {
        success: true,
        property,
    }))
}

/// DELETE /api/properties/:id
pub async fn delete_property(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<WriteResponse>, ApiError> {
    let result = state.gateway.delete(&id).await?;

    Ok(Json(WriteResponse::new(
        "Property deleted from search index successfully",
        result,
    )))
}

/// POST /api/properties/search
pub async fn search_properties(
    State(state): State<AppState>,
    payload: Result<Json<SearchQuery>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Json(query) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "Rejected search payload");
        ApiError::rejected_body(SEARCH_FAILED, rejection)
    })?;

    let results = state.gateway.search(&query).await?;

    Ok(Json(SearchResponse {
        success: true,
        results,
    }))
}
