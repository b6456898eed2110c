//! Check Repository

use super::{RepoError, RepoResult};
use serde_json::Value;
use shared::models::{Check, CheckFilter, CheckStatus, CheckType, CheckUpdate};
use sqlx::{QueryBuilder, Sqlite, SqliteExecutor, SqlitePool};

pub async fn find_all(pool: &SqlitePool, filter: &CheckFilter) -> RepoResult<Vec<Check>> {
    let mut qb = QueryBuilder::<Sqlite>::new(
        "SELECT id, printer_id, check_type, order_data, status, pdf_file FROM check_record WHERE 1 = 1",
    );
    if let Some(printer_id) = filter.printer_id {
        qb.push(" AND printer_id = ").push_bind(printer_id);
    }
    if let Some(check_type) = filter.check_type {
        qb.push(" AND check_type = ").push_bind(check_type);
    }
    if let Some(status) = filter.status {
        qb.push(" AND status = ").push_bind(status);
    }
    qb.push(" ORDER BY id");

    let checks = qb.build_query_as::<Check>().fetch_all(pool).await?;
    Ok(checks)
}

pub async fn find_by_id<'e>(executor: impl SqliteExecutor<'e>, id: i64) -> RepoResult<Option<Check>> {
    let check = sqlx::query_as::<_, Check>(
        "SELECT id, printer_id, check_type, order_data, status, pdf_file FROM check_record WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;
    Ok(check)
}

/// Whether any stored check carries this `order.order_id`
///
/// `order_id_json` is the JSON text of the id (`101` or `"A-7"`), so the
/// comparison keeps the JSON type of both sides.
pub async fn exists_for_order<'e>(
    executor: impl SqliteExecutor<'e>,
    order_id_json: &str,
) -> RepoResult<bool> {
    let exists = sqlx::query_scalar::<_, i64>(
        "SELECT EXISTS (SELECT 1 FROM check_record WHERE json_extract(order_data, '$.order_id') = json_extract(?1, '$'))",
    )
    .bind(order_id_json)
    .fetch_one(executor)
    .await?;
    Ok(exists != 0)
}

/// Insert a `new` check for a printer
pub async fn insert<'e>(
    executor: impl SqliteExecutor<'e>,
    printer_id: i64,
    check_type: CheckType,
    order: &Value,
) -> RepoResult<Check> {
    let check = sqlx::query_as::<_, Check>(
        "INSERT INTO check_record (printer_id, check_type, order_data, status) VALUES (?1, ?2, ?3, 'new') RETURNING id, printer_id, check_type, order_data, status, pdf_file",
    )
    .bind(printer_id)
    .bind(check_type)
    .bind(order.to_string())
    .fetch_one(executor)
    .await?;
    Ok(check)
}

/// Flip every `rendered` check of a printer to `printed` in one statement
///
/// Returns the flipped checks ordered by id; empty when none were waiting.
pub async fn take_rendered_for_printer(pool: &SqlitePool, printer_id: i64) -> RepoResult<Vec<Check>> {
    let mut checks = sqlx::query_as::<_, Check>(
        "UPDATE check_record SET status = 'printed' WHERE printer_id = ? AND status = 'rendered' RETURNING id, printer_id, check_type, order_data, status, pdf_file",
    )
    .bind(printer_id)
    .fetch_all(pool)
    .await?;
    checks.sort_by_key(|c| c.id);
    Ok(checks)
}

/// Record the rendered file, only if the check is still `new`
///
/// Returns false when the check is gone or already moved on.
pub async fn mark_rendered(pool: &SqlitePool, id: i64, pdf_file: &str) -> RepoResult<bool> {
    let result = sqlx::query(
        "UPDATE check_record SET status = 'rendered', pdf_file = ?1 WHERE id = ?2 AND status = 'new'",
    )
    .bind(pdf_file)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Update the provided fields only; `pdf_file` is never touched here
pub async fn update(pool: &SqlitePool, id: i64, data: CheckUpdate) -> RepoResult<Check> {
    let order_json = data.order.as_ref().map(Value::to_string);
    let check = sqlx::query_as::<_, Check>(
        "UPDATE check_record SET printer_id = COALESCE(?1, printer_id), check_type = COALESCE(?2, check_type), order_data = COALESCE(?3, order_data), status = COALESCE(?4, status) WHERE id = ?5 RETURNING id, printer_id, check_type, order_data, status, pdf_file",
    )
    .bind(data.printer_id)
    .bind(data.check_type)
    .bind(order_json)
    .bind(data.status)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    check.ok_or_else(|| RepoError::NotFound(format!("Check {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM check_record WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn count(pool: &SqlitePool) -> RepoResult<i64> {
    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM check_record")
        .fetch_one(pool)
        .await?;
    Ok(total)
}

/// Status of a check, if it still exists
pub async fn find_status(pool: &SqlitePool, id: i64) -> RepoResult<Option<CheckStatus>> {
    let status = sqlx::query_scalar::<_, CheckStatus>("SELECT status FROM check_record WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(status)
}

/// Ids of checks in `status`, oldest first
pub async fn find_ids_by_status(pool: &SqlitePool, status: CheckStatus) -> RepoResult<Vec<i64>> {
    let ids = sqlx::query_scalar::<_, i64>("SELECT id FROM check_record WHERE status = ? ORDER BY id")
        .bind(status)
        .fetch_all(pool)
        .await?;
    Ok(ids)
}
