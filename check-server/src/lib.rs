//! Check Server - 餐厅出单服务
//!
//! # 架构概述
//!
//! 收银端提交订单后，服务为订单所在点位的每台打印机生成一张出单
//! (厨房单或顾客单)，后台渲染为 PDF，打印机通过 api_key 轮询取走。
//!
//! - **数据库** (`db`): SQLite (sqlx)，打印机与出单两张表
//! - **服务** (`services`): 订单拆单、打印轮询、状态规则
//! - **渲染** (`rendering`): 渲染队列、模板、PDF 存储、后台工作者
//! - **HTTP API** (`api`): RESTful 接口
//!
//! # 模块结构
//!
//! ```text
//! check-server/src/
//! ├── core/          # 配置、状态、错误、后台任务
//! ├── api/           # HTTP 路由和处理器
//! ├── routes/        # 路由组装与中间件
//! ├── services/      # 出单业务逻辑
//! ├── rendering/     # PDF 渲染流水线
//! ├── utils/         # 错误、提取器、校验、日志
//! └── db/            # 数据库层
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod rendering;
pub mod routes;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use rendering::{RenderJob, RenderQueue};
pub use routes::build_app;
pub use services::CheckService;
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger, init_logger_with_file};

/// 日志文件保留天数
const LOG_RETENTION_DAYS: u64 = 14;

/// 设置运行环境: 初始化日志、清理过期日志
pub fn setup_environment(config: &Config) {
    init_logger_with_file(Some(&config.log_level), config.log_dir.as_deref());

    if let Some(dir) = config.log_dir.as_deref() {
        match cleanup_old_logs(dir, LOG_RETENTION_DAYS) {
            Ok(0) => {}
            Ok(removed) => tracing::info!(removed, "Removed expired log files"),
            Err(e) => tracing::warn!(error = %e, "Failed to clean up log files"),
        }
    }
}
