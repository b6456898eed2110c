//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`printers`] - 打印机管理接口
//! - [`checks`] - 出单管理、下单拆单与打印轮询
//! - [`download`] - 已打印出单 PDF 下载

pub mod health;

pub mod checks;
pub mod download;
pub mod printers;

// Re-export common types for handlers
pub use crate::utils::{AppJson, AppPath, AppQuery, AppResult};
