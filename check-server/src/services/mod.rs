//! 服务层
//!
//! - [`CheckService`] - 订单拆单、打印轮询与出单状态规则

pub mod check_service;

pub use check_service::CheckService;
