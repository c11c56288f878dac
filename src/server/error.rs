//! HTTP error responses
//!
//! Every store error reaches the client as a JSON body carrying the message
//! and a stable code, with the status chosen by the error kind.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

use crate::error::{ErrorKind, PromptKeepError};

/// Error returned from HTTP handlers
#[derive(Debug)]
pub struct ApiError {
    pub message: String,
    pub status_code: StatusCode,
    pub error_code: &'static str,
}

impl ApiError {
    /// 400 with `VALIDATION_ERROR`
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: StatusCode::BAD_REQUEST,
            error_code: ErrorKind::Validation.code(),
        }
    }

    /// 404 with `NOT_FOUND`
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: StatusCode::NOT_FOUND,
            error_code: ErrorKind::NotFound.code(),
        }
    }

    /// 500 with the given code
    pub fn internal(message: impl Into<String>, error_code: &'static str) -> Self {
        Self {
            message: message.into(),
            status_code: StatusCode::INTERNAL_SERVER_ERROR,
            error_code,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<PromptKeepError> for ApiError {
    fn from(error: PromptKeepError) -> Self {
        let kind = error.kind();
        match kind {
            ErrorKind::Validation => ApiError::bad_request(error.to_string()),
            ErrorKind::NotFound => ApiError::not_found(error.to_string()),
            ErrorKind::Io | ErrorKind::Config => {
                tracing::error!("Request failed: {}", error);
                ApiError::internal(error.to_string(), kind.code())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": self.message,
            "code": self.error_code,
        });
        (self.status_code, Json(body)).into_response()
    }
}

/// Result type alias for HTTP handlers
pub type ApiResult<T> = Result<T, ApiError>;
