//! Logging Infrastructure
//!
//! Structured logging setup with support for both development and production environments.

use std::path::Path;
use std::time::{Duration, SystemTime};
use tracing::Subscriber;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Log file prefix used by the daily appender
const LOG_FILE_PREFIX: &str = "check-server";

/// Initialize the logger
pub fn init_logger() {
    init_logger_with_file(None, None);
}

/// Initialize the logger with optional file output
///
/// `RUST_LOG` wins over `log_level` when set. Console output stays on when
/// a log directory is configured.
pub fn init_logger_with_file(log_level: Option<&str>, log_dir: Option<&str>) {
    build_subscriber(log_level, log_dir).init();
}

fn build_subscriber(
    log_level: Option<&str>,
    log_dir: Option<&str>,
) -> impl Subscriber + Send + Sync + 'static {
    let filter = build_filter(log_level.unwrap_or("info"));

    let console_layer = fmt::layer()
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    // Daily file, skipped when the directory cannot be created
    let file_layer = log_dir
        .map(Path::new)
        .filter(|dir| std::fs::create_dir_all(dir).is_ok())
        .map(|dir| {
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX))
        });

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "check_server={level},check_render={level},tower_http={level}"
        ))
    })
}

/// Clean up log files older than `days`
///
/// Returns the number of removed files.
pub fn cleanup_old_logs(log_dir: &str, days: u64) -> std::io::Result<usize> {
    let max_age = Duration::from_secs(days * 24 * 60 * 60);
    let now = SystemTime::now();
    let mut removed = 0;

    for entry in std::fs::read_dir(log_dir)? {
        let entry = entry?;
        let name = entry.file_name();
        if !name.to_string_lossy().starts_with(LOG_FILE_PREFIX) {
            continue;
        }
        let modified = entry.metadata()?.modified()?;
        let expired = now
            .duration_since(modified)
            .map(|age| age > max_age)
            .unwrap_or(false);
        if expired {
            std::fs::remove_file(entry.path())?;
            removed += 1;
        }
    }

    Ok(removed)
}
