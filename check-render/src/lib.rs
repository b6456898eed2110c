//! # check-render
//!
//! HTML → PDF conversion library - low-level rendering capabilities only.
//!
//! ## Scope
//!
//! This crate handles HOW to convert:
//! - Spawning the external converter with a fixed argument list
//! - Streaming markup over stdin, collecting the PDF from stdout
//! - Timeouts (the child is killed when they elapse)
//!
//! Business logic (WHAT a check looks like) stays in application code:
//! - Check templates and totals → check-server
//!
//! ## Example
//!
//! ```ignore
//! use check_render::{PdfConverter, Wkhtmltopdf};
//! use std::time::Duration;
//!
//! let converter = Wkhtmltopdf::new("wkhtmltopdf").with_timeout(Duration::from_secs(30));
//! let pdf = converter.convert("<h1>Check #101</h1>").await?;
//! ```

mod converter;
mod error;

// Re-exports
pub use converter::{PdfConverter, Wkhtmltopdf};
pub use error::{RenderError, RenderResult};
