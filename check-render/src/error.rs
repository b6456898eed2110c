//! Error types for the render library

use std::time::Duration;
use thiserror::Error;

/// Converter error types
#[derive(Debug, Error)]
pub enum RenderError {
    /// Executable missing or not runnable
    #[error("Failed to start converter {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    /// Converter exited with a non-zero status
    #[error("Converter exited with {status}: {stderr}")]
    ExitStatus { status: String, stderr: String },

    /// Converter did not finish in time (child killed)
    #[error("Converter timed out after {0:?}")]
    Timeout(Duration),

    /// Converter succeeded but wrote nothing
    #[error("Converter produced no output")]
    EmptyOutput,

    /// IO error while talking to the child process
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for render operations
pub type RenderResult<T> = Result<T, RenderError>;
