//! Check API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /checks/ | GET / POST | 出单列表 / 按订单拆单 |
//! | /checks/{id}/ | GET / PUT / PATCH / DELETE | 单个出单 |
//! | /checks/print-checks/{api_key}/ | GET | 打印机轮询，取走已渲染出单 |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;
use crate::routes::SlashRouter;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route_any_slash("/checks", get(handler::list).post(handler::create))
        .route_any_slash(
            "/checks/print-checks/{api_key}",
            get(handler::print_checks),
        )
        .route_any_slash(
            "/checks/{id}",
            get(handler::get_by_id)
                .put(handler::replace)
                .patch(handler::update)
                .delete(handler::delete),
        )
}
