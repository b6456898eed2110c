//! Server Implementation
//!
//! HTTP 服务器启动和管理

use std::sync::Arc;

use check_render::Wkhtmltopdf;

use crate::core::{Config, Result, ServerState};
use crate::rendering::RenderQueue;

/// HTTP Server
pub struct Server {
    config: Config,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub async fn run(&self) -> Result<()> {
        let (queue, jobs) = RenderQueue::channel();
        let state = ServerState::initialize(&self.config, queue).await?;

        let converter = Wkhtmltopdf::new(&self.config.wkhtmltopdf_bin)
            .with_timeout(self.config.render_timeout());
        tracing::info!(
            binary = %converter.binary().display(),
            args = ?converter.args(),
            timeout = ?converter.timeout(),
            "PDF converter configured"
        );
        let tasks = state.start_background_tasks(jobs, Arc::new(converter))?;

        let app = crate::routes::build_app().with_state(state);

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!(%addr, environment = %self.config.environment, "Check server starting");

        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
                tracing::info!("Shutting down...");
            })
            .await?;

        tasks.shutdown().await;
        Ok(())
    }
}
