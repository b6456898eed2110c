//! Converter adapters for turning HTML into PDF bytes
//!
//! Supports:
//! - wkhtmltopdf (or any converter reading stdin and writing stdout)

use crate::error::{RenderError, RenderResult};
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info, instrument, warn};

/// Trait for HTML → PDF converters
#[async_trait]
pub trait PdfConverter: Send + Sync {
    /// Convert a complete HTML document to PDF bytes
    async fn convert(&self, html: &str) -> RenderResult<Vec<u8>>;

    /// Check if the converter can be started at all
    async fn is_available(&self) -> bool;
}

/// wkhtmltopdf subprocess adapter
///
/// Arguments are passed as a discrete list; markup never touches a shell.
#[derive(Debug, Clone)]
pub struct Wkhtmltopdf {
    binary: PathBuf,
    args: Vec<String>,
    timeout: Duration,
}

impl Wkhtmltopdf {
    /// Create a converter for the given executable
    ///
    /// Default arguments are `--quiet - -` (stdin → stdout), timeout 30s.
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            args: vec!["--quiet".to_string(), "-".to_string(), "-".to_string()],
            timeout: Duration::from_secs(30),
        }
    }

    /// Replace the argument list
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Set conversion timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn binary(&self) -> &PathBuf {
        &self.binary
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn spawn_error(&self, source: std::io::Error) -> RenderError {
        RenderError::Spawn {
            binary: self.binary.display().to_string(),
            source,
        }
    }
}

#[async_trait]
impl PdfConverter for Wkhtmltopdf {
    #[instrument(skip(self, html), fields(binary = %self.binary.display(), html_len = html.len()))]
    async fn convert(&self, html: &str) -> RenderResult<Vec<u8>> {
        let mut child = Command::new(&self.binary)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        let mut stdin = child.stdin.take().ok_or_else(|| {
            RenderError::Io(std::io::Error::other("converter stdin not captured"))
        })?;

        // stdin 与 stdout 并发处理，避免管道写满后互相等待
        let input = html.as_bytes().to_vec();
        let writer = tokio::spawn(async move {
            stdin.write_all(&input).await?;
            stdin.shutdown().await
        });

        // 超时后 future 被丢弃，kill_on_drop 负责杀掉子进程
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result?,
            Err(_) => {
                writer.abort();
                warn!(timeout = ?self.timeout, "Converter timed out, child killed");
                return Err(RenderError::Timeout(self.timeout));
            }
        };

        match writer.await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => debug!(error = %e, "Converter closed stdin early"),
            Err(e) => debug!(error = %e, "Stdin writer task failed"),
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(status = %output.status, %stderr, "Converter failed");
            return Err(RenderError::ExitStatus {
                status: output.status.to_string(),
                stderr,
            });
        }

        if output.stdout.is_empty() {
            return Err(RenderError::EmptyOutput);
        }

        info!(pdf_len = output.stdout.len(), "Conversion finished");
        Ok(output.stdout)
    }

    #[instrument(skip(self), fields(binary = %self.binary.display()))]
    async fn is_available(&self) -> bool {
        let probe = Command::new(&self.binary)
            .arg("--version")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .status();

        match tokio::time::timeout(Duration::from_secs(5), probe).await {
            Ok(Ok(status)) if status.success() => {
                info!("Converter available");
                true
            }
            Ok(Ok(status)) => {
                warn!(%status, "Converter probe failed");
                false
            }
            Ok(Err(e)) => {
                warn!(error = %e, "Converter not found");
                false
            }
            Err(_) => {
                warn!("Converter probe timeout");
                false
            }
        }
    }
}
