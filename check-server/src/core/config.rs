use std::path::{Path, PathBuf};
use std::time::Duration;

/// 服务器配置 - 出单服务的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 |
/// | HTTP_PORT | 8000 | HTTP 服务端口 |
/// | DATABASE_PATH | {WORK_DIR}/database/checks.db | SQLite 数据库文件 |
/// | MEDIA_ROOT | {WORK_DIR}/media | PDF 存储根目录 |
/// | WKHTMLTOPDF_BIN | wkhtmltopdf | HTML→PDF 转换程序 |
/// | RENDER_TIMEOUT_MS | 30000 | 单次转换超时(毫秒) |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 (RUST_LOG 优先) |
/// | LOG_DIR | - | 日志目录 (设置后按天滚动写文件) |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/checks HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库和渲染结果
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// SQLite 数据库文件路径
    pub database_path: String,
    /// 媒体根目录 (PDF 位于 `pdf/` 子目录)
    pub media_root: String,
    /// wkhtmltopdf 可执行文件
    pub wkhtmltopdf_bin: String,
    /// 单次转换超时 (毫秒)
    pub render_timeout_ms: u64,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 日志级别
    pub log_level: String,
    /// 日志目录
    pub log_dir: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into());

        Self {
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| default_database_path(&work_dir)),
            media_root: std::env::var("MEDIA_ROOT")
                .unwrap_or_else(|_| default_media_root(&work_dir)),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            wkhtmltopdf_bin: std::env::var("WKHTMLTOPDF_BIN")
                .unwrap_or_else(|_| "wkhtmltopdf".into()),
            render_timeout_ms: std::env::var("RENDER_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            work_dir,
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景，数据库和媒体目录跟随新的工作目录
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config.database_path = default_database_path(&config.work_dir);
        config.media_root = default_media_root(&config.work_dir);
        config
    }

    /// PDF 输出目录
    pub fn pdf_dir(&self) -> PathBuf {
        Path::new(&self.media_root).join(crate::rendering::PDF_DIR)
    }

    pub fn render_timeout(&self) -> Duration {
        Duration::from_millis(self.render_timeout_ms)
    }

    /// 创建工作目录结构 (database/ 与 media/pdf/)
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        if let Some(parent) = Path::new(&self.database_path).parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::create_dir_all(self.pdf_dir())?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn default_database_path(work_dir: &str) -> String {
    Path::new(work_dir)
        .join("database")
        .join("checks.db")
        .to_string_lossy()
        .into_owned()
}

fn default_media_root(work_dir: &str) -> String {
    Path::new(work_dir).join("media").to_string_lossy().into_owned()
}
