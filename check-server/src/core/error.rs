use thiserror::Error;

use crate::utils::AppError;

/// 服务器启动/运行错误
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("初始化失败: {0}")]
    Init(#[from] AppError),

    #[error("模板加载失败: {0}")]
    Template(String),
}

/// Server 的 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
