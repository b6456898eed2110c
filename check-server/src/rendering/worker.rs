//! Render Worker
//!
//! Drains the render queue and turns `new` checks into PDF files.
//! A job may be delivered more than once; only checks still in `new` are
//! rendered.

use super::{CheckStorage, CheckTemplate, RenderJob, RenderJobs, StorageError, TemplateError};
use crate::db::repository::{RepoError, check};
use check_render::{PdfConverter, RenderError};
use shared::models::CheckStatus;
use sqlx::SqlitePool;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Error)]
pub enum RenderJobError {
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("Conversion failed: {0}")]
    Convert(#[from] RenderError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

/// Why a job did nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Check deleted before the job ran
    Missing,
    /// Check already left `new`
    AlreadyProcessed(CheckStatus),
    /// Check deleted while converting; the written file was removed
    Vanished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered { pdf_file: String },
    Skipped(SkipReason),
}

/// PDF render worker
pub struct RenderWorker {
    pool: SqlitePool,
    storage: CheckStorage,
    template: Arc<CheckTemplate>,
    converter: Arc<dyn PdfConverter>,
}

impl RenderWorker {
    pub fn new(
        pool: SqlitePool,
        storage: CheckStorage,
        template: Arc<CheckTemplate>,
        converter: Arc<dyn PdfConverter>,
    ) -> Self {
        Self {
            pool,
            storage,
            template,
            converter,
        }
    }

    /// Run until the queue closes or shutdown is signalled
    pub async fn run(self, mut jobs: RenderJobs, shutdown: CancellationToken) {
        tracing::info!("Render worker started");

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::info!("Render worker received shutdown signal");
                    break;
                }
                job = jobs.recv() => {
                    let Some(job) = job else {
                        tracing::info!("Render queue closed, render worker stopping");
                        break;
                    };
                    self.handle(job).await;
                }
            }
        }
    }

    async fn handle(&self, job: RenderJob) {
        match self.process(job).await {
            Ok(RenderOutcome::Rendered { pdf_file }) => {
                tracing::info!(check_id = job.check_id, pdf_file = %pdf_file, "Check rendered");
            }
            Ok(RenderOutcome::Skipped(reason)) => {
                tracing::info!(check_id = job.check_id, reason = ?reason, "Render job skipped");
            }
            Err(e) => {
                // check stays new, no retry
                tracing::error!(check_id = job.check_id, error = %e, "Render job failed");
            }
        }
    }

    /// Render one check: template → PDF → file → `rendered`
    pub async fn process(&self, job: RenderJob) -> Result<RenderOutcome, RenderJobError> {
        let Some(record) = check::find_by_id(&self.pool, job.check_id).await? else {
            return Ok(RenderOutcome::Skipped(SkipReason::Missing));
        };
        if record.status != CheckStatus::New {
            return Ok(RenderOutcome::Skipped(SkipReason::AlreadyProcessed(
                record.status,
            )));
        }

        let html = self.template.render(&record)?;
        tracing::debug!(check_id = record.id, html_len = html.len(), "Check HTML rendered");

        let pdf = self.converter.convert(&html).await?;
        let pdf_file = self.storage.write(&record, &pdf).await?;

        if check::mark_rendered(&self.pool, record.id, &pdf_file).await? {
            return Ok(RenderOutcome::Rendered { pdf_file });
        }

        // no row updated: check deleted or moved on meanwhile
        match check::find_status(&self.pool, record.id).await? {
            None => {
                self.storage.remove(&pdf_file).await?;
                Ok(RenderOutcome::Skipped(SkipReason::Vanished))
            }
            Some(status) => Ok(RenderOutcome::Skipped(SkipReason::AlreadyProcessed(status))),
        }
    }
}
