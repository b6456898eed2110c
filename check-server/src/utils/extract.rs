//! 请求提取器
//!
//! 包装 axum 自带的提取器，解析失败时返回统一的 [`AppError`] 响应，
//! 而不是 axum 默认的纯文本错误。

use axum::extract::{FromRequest, FromRequestParts};

use super::AppError;

/// JSON 请求体 (解析失败 → 400)
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// 查询参数 (解析失败 → 400)
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

/// 路径参数 (解析失败 → 404)
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
