//! Check download 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;
use crate::routes::SlashRouter;

pub fn router() -> Router<ServerState> {
    Router::new().route_any_slash("/download-checks/{check_id}", get(handler::download))
}
