//! Printer API Handlers

use axum::{Json, extract::State, http::StatusCode};

use crate::core::ServerState;
use crate::db::repository::{RepoError, printer};
use crate::utils::validation::{
    MAX_PRINTER_TEXT_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppJson, AppPath, AppQuery, AppResult};
use shared::models::{Printer, PrinterCreate, PrinterFilter, PrinterUpdate};

/// GET /printers/ - 获取打印机列表 (name / check_type / search 过滤)
pub async fn list(
    State(state): State<ServerState>,
    AppQuery(filter): AppQuery<PrinterFilter>,
) -> AppResult<Json<Vec<Printer>>> {
    let printers = printer::find_all(&state.pool, &filter).await?;
    Ok(Json(printers))
}

/// GET /printers/:id - 获取单个打印机
pub async fn get_by_id(
    State(state): State<ServerState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<Printer>> {
    let p = printer::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::printer_not_found(id))?;
    Ok(Json(p))
}

/// POST /printers/ - 创建打印机
pub async fn create(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<PrinterCreate>,
) -> AppResult<(StatusCode, Json<Printer>)> {
    validate_required_text(&payload.name, "name", MAX_PRINTER_TEXT_LEN)?;
    validate_required_text(&payload.api_key, "api_key", MAX_PRINTER_TEXT_LEN)?;

    let p = printer::create(&state.pool, payload)
        .await
        .map_err(api_key_conflict)?;

    tracing::info!(printer_id = p.id, point_id = p.point_id, "Printer created");
    Ok((StatusCode::CREATED, Json(p)))
}

/// PUT /printers/:id - 替换打印机
pub async fn replace(
    State(state): State<ServerState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<PrinterCreate>,
) -> AppResult<Json<Printer>> {
    validate_required_text(&payload.name, "name", MAX_PRINTER_TEXT_LEN)?;
    validate_required_text(&payload.api_key, "api_key", MAX_PRINTER_TEXT_LEN)?;

    let p = printer::update(&state.pool, id, payload.into())
        .await
        .map_err(api_key_conflict)?;
    Ok(Json(p))
}

/// PATCH /printers/:id - 部分更新打印机
pub async fn update(
    State(state): State<ServerState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<PrinterUpdate>,
) -> AppResult<Json<Printer>> {
    validate_optional_text(&payload.name, "name", MAX_PRINTER_TEXT_LEN)?;
    validate_optional_text(&payload.api_key, "api_key", MAX_PRINTER_TEXT_LEN)?;

    let p = printer::update(&state.pool, id, payload)
        .await
        .map_err(api_key_conflict)?;
    Ok(Json(p))
}

/// DELETE /printers/:id - 删除打印机 (级联删除其出单)
pub async fn delete(
    State(state): State<ServerState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<StatusCode> {
    if !printer::delete(&state.pool, id).await? {
        return Err(AppError::printer_not_found(id));
    }
    tracing::info!(printer_id = id, "Printer deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn api_key_conflict(err: RepoError) -> AppError {
    match err {
        RepoError::Duplicate(_) => AppError::api_key_exists(),
        other => other.into(),
    }
}
