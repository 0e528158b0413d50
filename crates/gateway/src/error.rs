//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use clients::ClientError;
use orchestration::OrchestrationError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from the client, detected before any downstream call.
    BadRequest(String),
    /// A downstream service answered with a non-success status, relayed
    /// to the caller as-is.
    Downstream { status: u16, message: String },
    /// Internal server error.
    Internal(String),
}

impl ApiError {
    /// Maps a downstream client failure, keeping the downstream status and
    /// attaching a route-specific message. Transport and decode failures
    /// carry no usable status and surface as opaque 500s.
    pub fn from_client(error: ClientError, message: &str) -> Self {
        match error {
            ClientError::Status { status, .. } => ApiError::Downstream {
                status,
                message: message.to_string(),
            },
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Downstream { status, message } => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                message,
            ),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

impl From<OrchestrationError> for ApiError {
    fn from(error: OrchestrationError) -> Self {
        match error {
            OrchestrationError::EmptyCart => {
                ApiError::BadRequest("Cannot checkout with an empty cart".to_string())
            }
            err @ OrchestrationError::InvalidQuantity { .. } => {
                ApiError::BadRequest(err.to_string())
            }
            err @ OrchestrationError::ItemNotFound { .. } => ApiError::NotFound(err.to_string()),
            OrchestrationError::Client(client_error) => {
                let message = client_error.to_string();
                ApiError::from_client(client_error, &message)
            }
        }
    }
}
