//! Error types and API response structures

use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Generic text shown to users for unexpected faults
pub const UNEXPECTED_FAULT_MESSAGE: &str =
    "An unexpected error occurred, please contact the administrator";

/// Application error with structured error code and details
///
/// Business-rule violations carry a specific [`ErrorCode`]; unexpected faults
/// carry a system code (9xxx) and are reported to users without detail.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (offending field, id, ...)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    /// Whether this is an unexpected fault rather than a business-rule violation
    pub fn is_system(&self) -> bool {
        self.code.category().is_system()
    }

    /// Message presented to the end user.
    ///
    /// Business violations are prefixed with "Operation failed: "; system
    /// faults never leak their internal message.
    pub fn user_message(&self) -> String {
        if self.is_system() {
            UNEXPECTED_FAULT_MESSAGE.to_string()
        } else {
            format!("Operation failed: {}", self.message)
        }
    }

    // ==================== Convenience constructors ====================

    /// Create a required-field error naming the field
    pub fn required(field: &str) -> Self {
        Self::with_message(ErrorCode::RequiredField, format!("{field} is required"))
            .with_detail("field", field)
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }
}

/// Error body returned by every failed request
///
/// - `code`: Error code
/// - `message`: Message for the end user
/// - `details`: Offending field, id, ... (business faults only)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl ApiResponse {
    /// Create the user-facing error response for an AppError.
    ///
    /// Details of system faults are dropped.
    pub fn error(err: &AppError) -> Self {
        Self {
            code: err.code.code(),
            message: err.user_message(),
            details: if err.is_system() {
                None
            } else {
                err.details.clone()
            },
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();
        let body = ApiResponse::error(&self);

        let mut response = (status, Json(body)).into_response();
        // Request logging picks the fault up from here together with the path
        response.extensions_mut().insert(self);
        response
    }
}
