//! Check Service
//!
//! Order fan-out (one check per printer at the order's point), print polling
//! and the status rules applied to manual check edits.

use crate::db::repository::{RepoError, check, printer};
use crate::rendering::{RenderJob, RenderQueue};
use crate::utils::{AppError, AppResult};
use serde_json::Value;
use shared::models::{Check, CheckUpdate, order};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct CheckService {
    pool: SqlitePool,
    queue: RenderQueue,
}

impl CheckService {
    pub fn new(pool: SqlitePool, queue: RenderQueue) -> Self {
        Self { pool, queue }
    }

    /// Create one `new` check per printer serving `order.point_id`
    ///
    /// All checks are inserted in one transaction; render jobs are queued
    /// only after commit.
    pub async fn create_checks(&self, order: Value) -> AppResult<Vec<Check>> {
        let order_id = order::order_id(&order).ok_or_else(AppError::order_id_missing)?;

        let mut tx = self.pool.begin().await.map_err(RepoError::from)?;

        if check::exists_for_order(&mut *tx, &order_id.to_json()).await? {
            return Err(AppError::duplicate_order(&order_id));
        }

        let point_id = order::point_id(&order).ok_or_else(AppError::point_id_missing)?;
        let printers = match point_id.as_i64() {
            Some(point) => printer::find_by_point(&mut *tx, point).await?,
            None => Vec::new(),
        };
        if printers.is_empty() {
            return Err(AppError::no_printer_for_point(&point_id));
        }

        let mut checks = Vec::with_capacity(printers.len());
        for p in &printers {
            let created = check::insert(&mut *tx, p.id, p.check_type, &order).await?;
            checks.push(created);
        }

        tx.commit().await.map_err(RepoError::from)?;

        tracing::info!(
            order_id = %order_id,
            point_id = %point_id,
            count = checks.len(),
            "Checks created"
        );

        for c in &checks {
            if let Err(e) = self.queue.enqueue(RenderJob { check_id: c.id }) {
                // 出单保持 new
                tracing::error!(check_id = c.id, error = %e, "Failed to queue render job");
            }
        }

        Ok(checks)
    }

    /// Hand a printer its rendered checks, flipping them to `printed`
    pub async fn take_printable(&self, api_key: &str) -> AppResult<Vec<Check>> {
        let Some(p) = printer::find_by_api_key(&self.pool, api_key).await? else {
            return Err(AppError::unknown_api_key());
        };

        let checks = check::take_rendered_for_printer(&self.pool, p.id).await?;
        if checks.is_empty() {
            return Err(AppError::no_check_available(p.id));
        }

        tracing::info!(printer_id = p.id, count = checks.len(), "Checks handed to printer");
        Ok(checks)
    }

    /// Apply a manual edit: status only moves forward, printer must exist
    pub async fn update_check(&self, id: i64, data: CheckUpdate) -> AppResult<Check> {
        let current = check::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::check_not_found(id))?;

        if let Some(next) = data.status
            && !current.status.can_transition_to(next)
        {
            return Err(AppError::invalid_status_transition(current.status, next));
        }

        if let Some(printer_id) = data.printer_id
            && printer::find_by_id(&self.pool, printer_id).await?.is_none()
        {
            return Err(AppError::validation(format!(
                "Printer {printer_id} does not exist."
            )));
        }

        Ok(check::update(&self.pool, id, data).await?)
    }
}
