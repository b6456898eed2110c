//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] - 应用错误类型 (from shared::error)
//! - [`ApiResponse`] - API 响应结构 (from shared::error)
//! - 请求提取器、输入校验、日志

pub mod error;
pub mod extract;
pub mod logger;
pub mod result;
pub mod validation;

// Re-export error types from the error module (which re-exports from shared)
pub use error::{ApiResponse, AppError, ErrorCategory, ErrorCode};
pub use extract::{AppJson, AppPath, AppQuery};
pub use result::AppResult;
