//! Printer Repository

use super::{RepoError, RepoResult};
use shared::models::{Printer, PrinterCreate, PrinterFilter, PrinterUpdate};
use sqlx::{QueryBuilder, Sqlite, SqliteExecutor, SqlitePool};

pub async fn find_all(pool: &SqlitePool, filter: &PrinterFilter) -> RepoResult<Vec<Printer>> {
    let mut qb = QueryBuilder::<Sqlite>::new(
        "SELECT id, name, api_key, check_type, point_id FROM printer WHERE 1 = 1",
    );
    if let Some(name) = &filter.name {
        qb.push(" AND name = ").push_bind(name.clone());
    }
    if let Some(check_type) = filter.check_type {
        qb.push(" AND check_type = ").push_bind(check_type);
    }
    if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
        qb.push(" AND instr(lower(name), lower(")
            .push_bind(search.to_string())
            .push(")) > 0");
    }
    qb.push(" ORDER BY id");

    let printers = qb.build_query_as::<Printer>().fetch_all(pool).await?;
    Ok(printers)
}

pub async fn find_by_id<'e>(
    executor: impl SqliteExecutor<'e>,
    id: i64,
) -> RepoResult<Option<Printer>> {
    let printer = sqlx::query_as::<_, Printer>(
        "SELECT id, name, api_key, check_type, point_id FROM printer WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;
    Ok(printer)
}

pub async fn find_by_api_key(pool: &SqlitePool, api_key: &str) -> RepoResult<Option<Printer>> {
    let printer = sqlx::query_as::<_, Printer>(
        "SELECT id, name, api_key, check_type, point_id FROM printer WHERE api_key = ?",
    )
    .bind(api_key)
    .fetch_optional(pool)
    .await?;
    Ok(printer)
}

/// All printers serving a point, in registration order
pub async fn find_by_point<'e>(
    executor: impl SqliteExecutor<'e>,
    point_id: i64,
) -> RepoResult<Vec<Printer>> {
    let printers = sqlx::query_as::<_, Printer>(
        "SELECT id, name, api_key, check_type, point_id FROM printer WHERE point_id = ? ORDER BY id",
    )
    .bind(point_id)
    .fetch_all(executor)
    .await?;
    Ok(printers)
}

pub async fn create(pool: &SqlitePool, data: PrinterCreate) -> RepoResult<Printer> {
    let printer = sqlx::query_as::<_, Printer>(
        "INSERT INTO printer (name, api_key, check_type, point_id) VALUES (?1, ?2, ?3, ?4) RETURNING id, name, api_key, check_type, point_id",
    )
    .bind(data.name)
    .bind(data.api_key)
    .bind(data.check_type)
    .bind(data.point_id)
    .fetch_one(pool)
    .await?;
    Ok(printer)
}

/// Update the provided fields only (PUT passes all of them)
pub async fn update(pool: &SqlitePool, id: i64, data: PrinterUpdate) -> RepoResult<Printer> {
    let printer = sqlx::query_as::<_, Printer>(
        "UPDATE printer SET name = COALESCE(?1, name), api_key = COALESCE(?2, api_key), check_type = COALESCE(?3, check_type), point_id = COALESCE(?4, point_id) WHERE id = ?5 RETURNING id, name, api_key, check_type, point_id",
    )
    .bind(data.name)
    .bind(data.api_key)
    .bind(data.check_type)
    .bind(data.point_id)
    .bind(id)
    .fetch_optional(pool)
    .await?;

    printer.ok_or_else(|| RepoError::NotFound(format!("Printer {id} not found")))
}

/// Hard delete; the printer's checks go with it (ON DELETE CASCADE)
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM printer WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbService;
    use shared::models::CheckType;

    fn new_printer(name: &str, api_key: &str, check_type: CheckType, point_id: i64) -> PrinterCreate {
        PrinterCreate {
            name: name.to_string(),
            api_key: api_key.to_string(),
            check_type,
            point_id,
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let pool = DbService::in_memory().await.unwrap().pool;
        let created = create(&pool, new_printer("Kitchen", "k-1", CheckType::Kitchen, 1))
            .await
            .unwrap();

        let by_id = find_by_id(&pool, created.id).await.unwrap().unwrap();
        assert_eq!(by_id, created);

        let by_key = find_by_api_key(&pool, "k-1").await.unwrap().unwrap();
        assert_eq!(by_key.id, created.id);
        assert!(find_by_api_key(&pool, "nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_api_key() {
        let pool = DbService::in_memory().await.unwrap().pool;
        create(&pool, new_printer("A", "same", CheckType::Kitchen, 1))
            .await
            .unwrap();
        let err = create(&pool, new_printer("B", "same", CheckType::Client, 2))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }

    #[tokio::test]
    async fn test_find_by_point() {
        let pool = DbService::in_memory().await.unwrap().pool;
        create(&pool, new_printer("A", "a", CheckType::Kitchen, 1)).await.unwrap();
        create(&pool, new_printer("B", "b", CheckType::Client, 1)).await.unwrap();
        create(&pool, new_printer("C", "c", CheckType::Client, 2)).await.unwrap();

        let at_one = find_by_point(&pool, 1).await.unwrap();
        assert_eq!(at_one.len(), 2);
        assert_eq!(at_one[0].name, "A");
        assert!(find_by_point(&pool, 3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_filters() {
        let pool = DbService::in_memory().await.unwrap().pool;
        create(&pool, new_printer("Main Kitchen", "a", CheckType::Kitchen, 1)).await.unwrap();
        create(&pool, new_printer("Bar", "b", CheckType::Client, 1)).await.unwrap();

        let all = find_all(&pool, &PrinterFilter::default()).await.unwrap();
        assert_eq!(all.len(), 2);

        let search = PrinterFilter {
            search: Some("kitch".to_string()),
            ..Default::default()
        };
        let found = find_all(&pool, &search).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Main Kitchen");

        let by_type = PrinterFilter {
            check_type: Some(CheckType::Client),
            ..Default::default()
        };
        assert_eq!(find_all(&pool, &by_type).await.unwrap()[0].name, "Bar");

        let by_name = PrinterFilter {
            name: Some("Bar".to_string()),
            ..Default::default()
        };
        assert_eq!(find_all(&pool, &by_name).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_partial_update_and_delete() {
        let pool = DbService::in_memory().await.unwrap().pool;
        let printer = create(&pool, new_printer("A", "a", CheckType::Kitchen, 1))
            .await
            .unwrap();

        let updated = update(
            &pool,
            printer.id,
            PrinterUpdate {
                point_id: Some(7),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.point_id, 7);
        assert_eq!(updated.name, "A");

        let missing = update(&pool, 999, PrinterUpdate::default()).await.unwrap_err();
        assert!(matches!(missing, RepoError::NotFound(_)));

        assert!(delete(&pool, printer.id).await.unwrap());
        assert!(!delete(&pool, printer.id).await.unwrap());
    }
}
