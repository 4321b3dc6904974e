//! API Error Types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use naics_core::CoreError;
use naics_store::StoreError;
use serde::Serialize;
use thiserror::Error;

/// API-specific errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// Validation error
    #[error("Validation error: {message}")]
    ValidationError { message: String },

    /// No cache file has been written yet
    #[error("NAICS data not processed yet")]
    NotProcessed,

    /// Resource not found
    #[error("{resource_type} {id} not found")]
    NotFound { resource_type: String, id: String },

    /// Unauthorized access
    #[error("{reason}")]
    Unauthorized { reason: String },

    /// Store error
    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),

    /// Core error
    #[error("Core error: {0}")]
    CoreError(#[from] CoreError),
}

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code
    pub code: String,
    /// Error message
    pub message: String,
    /// Optional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotProcessed => StatusCode::NOT_FOUND,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::StoreError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::CoreError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code string
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::ValidationError { .. } => "VALIDATION_ERROR",
            ApiError::NotProcessed | ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::Unauthorized { .. } => "UNAUTHORIZED",
            ApiError::StoreError(StoreError::DownloadFailed { .. }) => "DOWNLOAD_FAILED",
            ApiError::StoreError(_) => "STORE_ERROR",
            ApiError::CoreError(_) => "CORE_ERROR",
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::ValidationError {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        ApiError::NotFound {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }

    /// Create an unauthorized error
    pub fn unauthorized(reason: impl Into<String>) -> Self {
        ApiError::Unauthorized {
            reason: reason.into(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ApiError::StoreError(StoreError::DownloadFailed { status }) => {
                serde_json::to_value(status).ok()
            }
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let error_response = ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        };

        (status, Json(error_response)).into_response()
    }
}
