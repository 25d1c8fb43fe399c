use axum::{extract::Json, http::StatusCode};
use contracts::shared::logger::{CreateLogRequest, LogEntry};

use crate::shared::logger::repository;

/// GET /api/logs, newest first
pub async fn list_all() -> Result<Json<Vec<LogEntry>>, StatusCode> {
    let logs = repository::get_all_logs().await.map_err(|e| {
        tracing::error!("Failed to load logs: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(logs))
}

/// POST /api/logs lets API clients append their own records
pub async fn create(Json(request): Json<CreateLogRequest>) -> Result<StatusCode, StatusCode> {
    repository::log_event(&request.source, &request.category, &request.message)
        .await
        .map_err(|e| {
            tracing::error!("Failed to write log record: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(StatusCode::CREATED)
}

/// DELETE /api/logs
pub async fn clear_all() -> Result<StatusCode, StatusCode> {
    repository::clear_all_logs().await.map_err(|e| {
        tracing::error!("Failed to clear logs: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(StatusCode::OK)
}
