//! Check API Handlers

use axum::{Json, extract::State, http::StatusCode};

use crate::core::ServerState;
use crate::db::repository::check;
use crate::utils::{AppError, AppJson, AppPath, AppQuery, AppResult};
use shared::models::{
    Check, CheckCreate, CheckFilter, CheckReplace, CheckUpdate, CreatedChecks,
};

/// GET /checks/ - 获取出单列表 (printer_id / check_type / status 过滤)
pub async fn list(
    State(state): State<ServerState>,
    AppQuery(filter): AppQuery<CheckFilter>,
) -> AppResult<Json<Vec<Check>>> {
    let checks = check::find_all(&state.pool, &filter).await?;
    Ok(Json(checks))
}

/// POST /checks/ - 按订单为该点位的每台打印机创建出单
pub async fn create(
    State(state): State<ServerState>,
    AppJson(payload): AppJson<CheckCreate>,
) -> AppResult<(StatusCode, Json<CreatedChecks>)> {
    let checks = state.check_service().create_checks(payload.order).await?;
    Ok((StatusCode::CREATED, Json(CreatedChecks { checks })))
}

/// GET /checks/:id - 获取单个出单
pub async fn get_by_id(
    State(state): State<ServerState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<Json<Check>> {
    let c = check::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::check_not_found(id))?;
    Ok(Json(c))
}

/// PUT /checks/:id - 替换出单 (status 可选)
pub async fn replace(
    State(state): State<ServerState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<CheckReplace>,
) -> AppResult<Json<Check>> {
    let c = state.check_service().update_check(id, payload.into()).await?;
    Ok(Json(c))
}

/// PATCH /checks/:id - 部分更新出单
pub async fn update(
    State(state): State<ServerState>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<CheckUpdate>,
) -> AppResult<Json<Check>> {
    let c = state.check_service().update_check(id, payload).await?;
    Ok(Json(c))
}

/// DELETE /checks/:id - 删除出单
pub async fn delete(
    State(state): State<ServerState>,
    AppPath(id): AppPath<i64>,
) -> AppResult<StatusCode> {
    if !check::delete(&state.pool, id).await? {
        return Err(AppError::check_not_found(id));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /checks/print-checks/:api_key - 打印机取走所有已渲染出单并标记为已打印
pub async fn print_checks(
    State(state): State<ServerState>,
    AppPath(api_key): AppPath<String>,
) -> AppResult<Json<Vec<Check>>> {
    let checks = state.check_service().take_printable(&api_key).await?;
    Ok(Json(checks))
}
