//! Check Rendering Module
//!
//! Turns freshly created checks into PDF files:
//! - `queue`: in-process job queue fed by the fan-out service
//! - `template`: HTML for kitchen and client checks
//! - `storage`: PDF files under the media root
//! - `worker`: consumes jobs, converts and records the result

pub mod queue;
pub mod storage;
pub mod template;
pub mod worker;

pub use queue::{QueueClosed, RenderJob, RenderJobs, RenderQueue};
pub use storage::{CheckStorage, StorageError};
pub use template::{CheckTemplate, TemplateError};
pub use worker::{RenderJobError, RenderOutcome, RenderWorker, SkipReason};

/// PDF subdirectory, relative to the media root
pub const PDF_DIR: &str = "pdf";
