//! 统一错误处理
//!
//! 错误类型来自 `shared::error`：
//! - [`AppError`] - 错误码 + 消息 + 详情，实现 `IntoResponse`
//! - [`ApiResponse`] - 错误响应体 `{code, message, details?}`
//!
//! 仓储层 (`RepoError`) 与存储层 (`StorageError`) 在各自模块中实现到
//! [`AppError`] 的转换；请求提取失败的转换在 shared 中实现。
//!
//! # 使用示例
//!
//! ```ignore
//! // 返回错误
//! Err(AppError::check_not_found(id))
//! ```

pub use shared::error::{ApiResponse, AppError, ErrorCategory, ErrorCode};
