//! API error types with IntoResponse
//!
//! Every failure is rendered as `{"error": "<message>"}` with the matching
//! status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use civicsense_core::ValidationError;
use serde_json::json;

use crate::db::StoreError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Store never connected (500)
    Unavailable,

    /// Store error (500, logged)
    Store(StoreError),
}

impl ApiError {
    pub fn user_not_found(user_id: &str) -> Self {
        Self::NotFound {
            resource: "User",
            id: user_id.to_owned(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Unavailable | Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Validation(e) => e.to_string(),
            Self::NotFound { resource, id } => {
                tracing::debug!(resource, id = %id, "Lookup missed");
                format!("{} not found", resource)
            }
            Self::Unavailable => "Database not connected".to_string(),
            Self::Store(e) => {
                // Log the actual error, return generic message
                tracing::error!("Store error: {}", e);
                "an internal error occurred".to_string()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Unavailable => Self::Unavailable,
            _ => Self::Store(e),
        }
    }
}
