use check_server::{Config, Server, setup_environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 加载 .env 与配置
    dotenv::dotenv().ok();
    let config = Config::from_env();

    // 2. 日志
    setup_environment(&config);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        port = config.http_port,
        work_dir = %config.work_dir,
        "Check server starting..."
    );

    // 3. 启动 HTTP 服务器 (包含后台渲染工作者)
    let server = Server::new(config);
    if let Err(e) = server.run().await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    Ok(())
}
