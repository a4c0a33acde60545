//! Response envelopes and error mapping.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;

use property_search_repository::GatewayError;

pub(crate) const UPSERT_FAILED: &str = "Failed to add property";
pub(crate) const NOT_FOUND: &str = "Property not found";
pub(crate) const DELETE_FAILED: &str = "Failed to delete property";
pub(crate) const SEARCH_FAILED: &str = "Failed to search properties";

/// `{success: true, message, result}` for write operations.
#[derive(Debug, Serialize)]
pub struct WriteResponse {
    pub success: bool,
    pub message: &'static str,
    pub result: Value,
}

impl WriteResponse {
    pub fn new(message: &'static str, result: Value) -> Self {
        Self {
            success: true,
            message,
            result,
        }
    }
}

/// `{success: true, property}` for record lookups.
#[derive(Debug, Serialize)]
pub struct PropertyResponse {
    pub success: bool,
    pub property: Value,
}

/// `{success: true, results}` for searches.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub results: Value,
}

/// `{success: false, message, error}` returned for every failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub message: String,
    pub error: String,
}

/// A failed request: status code plus the error envelope.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: &'static str,
    error: String,
}

impl ApiError {
    /// A request body that could not be read, reported as the failure of the
    /// operation it was meant for.
    pub(crate) fn rejected_body(message: &'static str, rejection: JsonRejection) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message,
            error: rejection.body_text(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        let (status, message) = match &err {
            GatewayError::Upsert(_) => (StatusCode::INTERNAL_SERVER_ERROR, UPSERT_FAILED),
            GatewayError::NotFound(_) => (StatusCode::NOT_FOUND, NOT_FOUND),
            GatewayError::Delete(_) => (StatusCode::INTERNAL_SERVER_ERROR, DELETE_FAILED),
            GatewayError::Search(_) => (StatusCode::INTERNAL_SERVER_ERROR, SEARCH_FAILED),
        };

        Self {
            status,
            message,
            error: err.cause().to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorEnvelope {
                success: false,
                message: self.message.to_string(),
                error: self.error,
            }),
        )
            .into_response()
    }
}
