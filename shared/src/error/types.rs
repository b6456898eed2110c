//! Error types and API response structures

use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt::Display;
use thiserror::Error;

/// Application error with structured error code and details
///
/// This is the primary error type of the service, providing:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details for debugging
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
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

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::StorageError, msg)
    }

    // ==================== Printer / check constructors ====================

    /// Printer with this id does not exist
    pub fn printer_not_found(id: i64) -> Self {
        Self::with_message(ErrorCode::PrinterNotFound, format!("Printer {} not found", id))
            .with_detail("printer_id", id)
    }

    /// No printer matches the given access key
    pub fn unknown_api_key() -> Self {
        Self::new(ErrorCode::PrinterNotFound)
    }

    /// Access key already taken
    pub fn api_key_exists() -> Self {
        Self::new(ErrorCode::PrinterApiKeyExists)
    }

    /// Check with this id does not exist
    pub fn check_not_found(id: i64) -> Self {
        Self::with_message(ErrorCode::CheckNotFound, format!("Check {} not found", id))
            .with_detail("check_id", id)
    }

    pub fn order_id_missing() -> Self {
        Self::new(ErrorCode::OrderIdMissing)
    }

    pub fn point_id_missing() -> Self {
        Self::new(ErrorCode::PointIdMissing)
    }

    pub fn duplicate_order(order_id: impl Display) -> Self {
        Self::with_message(
            ErrorCode::DuplicateOrder,
            format!("Checks for order: {} already exist.", order_id),
        )
    }

    pub fn no_printer_for_point(point_id: impl Display) -> Self {
        Self::with_message(
            ErrorCode::NoPrinterForPoint,
            format!("There are no printers available for point: {}.", point_id),
        )
    }

    pub fn no_check_available(printer_id: i64) -> Self {
        Self::with_message(
            ErrorCode::NoCheckAvailable,
            format!("There are no checks available for the printer: {}.", printer_id),
        )
    }

    pub fn check_not_available(check_id: i64) -> Self {
        Self::with_message(
            ErrorCode::CheckNotAvailable,
            format!("Check: {} is not available for download.", check_id),
        )
    }

    pub fn check_file_missing() -> Self {
        Self::new(ErrorCode::CheckFileMissing)
    }

    pub fn invalid_status_transition(from: impl Display, to: impl Display) -> Self {
        Self::with_message(
            ErrorCode::InvalidStatusTransition,
            format!("Check status cannot move from {} to {}.", from, to),
        )
    }
}

/// Unified API error body
///
/// Every failed request answers with the same shape:
/// - `code`: Error code
/// - `message`: Human-readable message
/// - `details`: Additional error details (optional)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    /// Numeric error code
    pub code: u16,
    /// Human-readable message
    pub message: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl ApiResponse {
    /// Create an error response from an AppError
    pub fn error(err: &AppError) -> Self {
        Self {
            code: err.code.code(),
            message: err.message.clone(),
            details: err.details.clone(),
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

        // Log system errors
        if matches!(self.code.category(), super::category::ErrorCategory::System) {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        }

        (status, Json(body)).into_response()
    }
}

impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

impl From<axum::extract::rejection::QueryRejection> for AppError {
    fn from(rejection: axum::extract::rejection::QueryRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

// 非法的路径参数 (例如非数字 id) 视为资源不存在
impl From<axum::extract::rejection::PathRejection> for AppError {
    fn from(_: axum::extract::rejection::PathRejection) -> Self {
        Self::new(ErrorCode::NotFound)
    }
}
