//! Printer API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;
use crate::routes::SlashRouter;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route_any_slash("/printers", get(handler::list).post(handler::create))
        .route_any_slash(
            "/printers/{id}",
            get(handler::get_by_id)
                .put(handler::replace)
                .patch(handler::update)
                .delete(handler::delete),
        )
}
