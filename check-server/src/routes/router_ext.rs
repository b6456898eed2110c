//! Router extension for slash-insensitive routes
//!
//! 客户端会同时使用 `/printers/1` 与 `/printers/1/`，
//! axum 精确匹配路径，所以每个路由注册两次。

use axum::Router;
use axum::routing::MethodRouter;

pub trait SlashRouter<S> {
    /// Register `path` with and without a trailing slash
    fn route_any_slash(self, path: &str, method_router: MethodRouter<S>) -> Self;
}

impl<S> SlashRouter<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn route_any_slash(self, path: &str, method_router: MethodRouter<S>) -> Self {
        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() {
            return self.route("/", method_router);
        }
        self.route(trimmed, method_router.clone())
            .route(&format!("{trimmed}/"), method_router)
    }
}
