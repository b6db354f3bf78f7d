//! Error types for voiceage-api
//!
//! Input rejections carry a human-readable cause for the caller. Internal
//! failures are logged with full detail and answered with a generic message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Shown to the caller for every 500
pub const INTERNAL_ERROR_MESSAGE: &str = "분석 중 오류가 발생했습니다. 잠시 후 다시 시도해 주세요.";

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Upload over the configured size limit (413)
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// Upload part with a non-audio content type (415)
    #[error("Unsupported media type: {0}")]
    UnsupportedMedia(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// voiceage-core error
    #[error("Core error: {0}")]
    Core(#[from] voiceage_core::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::UnsupportedMedia(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::Internal(_) | ApiError::Core(_) | ApiError::Io(_) | ApiError::Other(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error_code, message) = match self {
            ApiError::BadRequest(msg) => {
                warn!(reason = %msg, "Rejected request");
                ("BAD_REQUEST", msg)
            }
            ApiError::PayloadTooLarge(msg) => {
                warn!(reason = %msg, "Rejected oversized upload");
                ("PAYLOAD_TOO_LARGE", msg)
            }
            ApiError::UnsupportedMedia(msg) => {
                warn!(reason = %msg, "Rejected upload content type");
                ("UNSUPPORTED_MEDIA", msg)
            }
            internal => {
                error!(error = %internal, "Analysis failed");
                ("INTERNAL_ERROR", INTERNAL_ERROR_MESSAGE.to_string())
            }
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
