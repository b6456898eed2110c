//! Shared types for the check service
//!
//! Domain models (printers, checks, order payloads) and the unified error
//! system used by every crate in the workspace.

pub mod error;
pub mod models;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{Check, CheckStatus, CheckType, Printer};
