//! Check download handler
//!
//! Only `printed` checks can be downloaded; the file is streamed inline.

use axum::{
    body::Body,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use tokio_util::io::ReaderStream;

use crate::core::ServerState;
use crate::db::repository::check;
use crate::utils::{AppError, AppPath, AppResult};
use shared::models::CheckStatus;

/// GET /download-checks/:check_id - 下载已打印出单的 PDF
pub async fn download(
    State(state): State<ServerState>,
    AppPath(check_id): AppPath<i64>,
) -> AppResult<Response> {
    let record = check::find_by_id(&state.pool, check_id)
        .await?
        .ok_or_else(|| AppError::check_not_found(check_id))?;

    if record.status != CheckStatus::Printed {
        return Err(AppError::check_not_available(check_id));
    }

    let path = state.storage.locate(&record);
    let file = match tokio::fs::File::open(&path).await {
        Ok(file) => file,
        Err(e) => {
            tracing::warn!(check_id, path = %path.display(), error = %e, "Check file missing");
            return Err(AppError::check_file_missing());
        }
    };

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| format!("{check_id}.pdf"));

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{file_name}\""),
        ),
    ];
    let body = Body::from_stream(ReaderStream::new(file));

    Ok((headers, body).into_response())
}
