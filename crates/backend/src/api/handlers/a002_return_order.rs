use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use contracts::domain::a002_return_order::{ReturnEventRecord, ReturnOrder, ReturnOrderListItem};
use contracts::domain::a003_inspection::Inspection;
use contracts::usecases::common::error::WorkflowError;

use crate::domain::a002_return_order::{repository, service};
use crate::domain::a003_inspection;
use crate::system::auth::extractor::CurrentUser;

/// Query parameters for the returns list
#[derive(Debug, Deserialize)]
pub struct ListReturnsQuery {
    pub status: Option<String>,
    pub search: Option<String>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub sort_by: Option<String>,
    pub sort_desc: Option<bool>,
}

/// Paginated list response
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedReturnsResponse {
    pub items: Vec<ReturnOrderListItem>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

/// Full picture of one return order for the staff detail view
#[derive(Debug, Serialize)]
pub struct ReturnOrderDetailResponse {
    pub order: ReturnOrder,
    pub inspections: Vec<Inspection>,
    pub events: Vec<ReturnEventRecord>,
}

/// Optional body for staff lifecycle actions
#[derive(Debug, Default, Deserialize)]
pub struct StatusActionRequest {
    pub note: Option<String>,
}

/// GET /api/returns
pub async fn list_returns(
    Query(query): Query<ListReturnsQuery>,
) -> Result<Json<PaginatedReturnsResponse>, StatusCode> {
    let page_size = query.limit.unwrap_or(100);
    let offset = query.offset.unwrap_or(0);
    let page = if page_size > 0 { offset / page_size } else { 0 };

    let list_query = repository::ReturnsListQuery {
        status: query.status.clone(),
        search: query.search.clone(),
        sort_by: query
            .sort_by
            .clone()
            .unwrap_or_else(|| "created_at".to_string()),
        sort_desc: query.sort_desc.unwrap_or(true),
        limit: page_size,
        offset,
    };

    let result = service::list(list_query).await.map_err(|e| {
        tracing::error!("Failed to list return orders: {}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let total = result.total;
    let total_pages = if page_size > 0 {
        (total + page_size - 1) / page_size
    } else {
        0
    };

    Ok(Json(PaginatedReturnsResponse {
        items: result.items,
        total,
        page,
        page_size,
        total_pages,
    }))
}

/// GET /api/returns/:rma_number
///
/// Composes the order with its inspections and audit trail so the staff
/// detail screen needs a single round trip.
pub async fn get_return_detail(
    Path(rma_number): Path<String>,
) -> Result<Json<ReturnOrderDetailResponse>, StatusCode> {
    let order = service::get_by_rma_number(&rma_number)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load return order {}: {}", rma_number, e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::NOT_FOUND)?;

    let inspections = a003_inspection::service::list_for_return(&order.to_string_id())
        .await
        .map_err(|e| {
            tracing::error!("Failed to load inspections for {}: {}", rma_number, e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    let events = service::events_for(order.base.id.value())
        .await
        .map_err(|e| {
            tracing::error!("Failed to load events for {}: {}", rma_number, e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(Json(ReturnOrderDetailResponse {
        order,
        inspections,
        events,
    }))
}

/// GET /api/returns/:rma_number/events
pub async fn get_return_events(
    Path(rma_number): Path<String>,
) -> Result<Json<Vec<ReturnEventRecord>>, StatusCode> {
    let order = service::get_by_rma_number(&rma_number)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load return order {}: {}", rma_number, e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::NOT_FOUND)?;

    let events = service::events_for(order.base.id.value())
        .await
        .map_err(|e| {
            tracing::error!("Failed to load events for {}: {}", rma_number, e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(Json(events))
}

/// POST /api/returns/:rma_number/approve
pub async fn approve(
    Path(rma_number): Path<String>,
    CurrentUser(claims): CurrentUser,
    body: Option<Json<StatusActionRequest>>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let note = body.and_then(|Json(b)| b.note);
    match service::approve(&rma_number, &claims.username, note).await {
        Ok(order) => Ok(lifecycle_success(&order)),
        Err(e) => Err(workflow_error_response("approve", &rma_number, e)),
    }
}

/// POST /api/returns/:rma_number/reject
pub async fn reject(
    Path(rma_number): Path<String>,
    CurrentUser(claims): CurrentUser,
    body: Option<Json<StatusActionRequest>>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let note = body.and_then(|Json(b)| b.note);
    match service::reject(&rma_number, &claims.username, note).await {
        Ok(order) => Ok(lifecycle_success(&order)),
        Err(e) => Err(workflow_error_response("reject", &rma_number, e)),
    }
}

/// POST /api/returns/:rma_number/mark-in-transit
pub async fn mark_in_transit(
    Path(rma_number): Path<String>,
    CurrentUser(claims): CurrentUser,
    body: Option<Json<StatusActionRequest>>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let note = body.and_then(|Json(b)| b.note);
    match service::mark_in_transit(&rma_number, &claims.username, note).await {
        Ok(order) => Ok(lifecycle_success(&order)),
        Err(e) => Err(workflow_error_response("mark in transit", &rma_number, e)),
    }
}

/// POST /api/returns/:rma_number/shelve-restock
pub async fn shelve_restock(
    Path(rma_number): Path<String>,
    CurrentUser(claims): CurrentUser,
    body: Option<Json<StatusActionRequest>>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let note = body.and_then(|Json(b)| b.note);
    match service::shelve_restock(&rma_number, &claims.username, note).await {
        Ok(order) => Ok(lifecycle_success(&order)),
        Err(e) => Err(workflow_error_response("shelve restock", &rma_number, e)),
    }
}

/// POST /api/returns/:rma_number/close
pub async fn close(
    Path(rma_number): Path<String>,
    CurrentUser(claims): CurrentUser,
    body: Option<Json<StatusActionRequest>>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let note = body.and_then(|Json(b)| b.note);
    match service::close(&rma_number, &claims.username, note).await {
        Ok(order) => Ok(lifecycle_success(&order)),
        Err(e) => Err(workflow_error_response("close", &rma_number, e)),
    }
}

/// POST /api/returns/:rma_number/cancel
pub async fn cancel(
    Path(rma_number): Path<String>,
    CurrentUser(claims): CurrentUser,
    body: Option<Json<StatusActionRequest>>,
) -> Result<Json<serde_json::Value>, (StatusCode, Json<serde_json::Value>)> {
    let note = body.and_then(|Json(b)| b.note);
    match service::cancel(&rma_number, &claims.username, note).await {
        Ok(order) => Ok(lifecycle_success(&order)),
        Err(e) => Err(workflow_error_response("cancel", &rma_number, e)),
    }
}

fn lifecycle_success(order: &ReturnOrder) -> Json<serde_json::Value> {
    Json(json!({
        "success": true,
        "rmaNumber": order.rma_number(),
        "status": order.state.status,
    }))
}

/// Map a failed lifecycle action to an HTTP error response.
///
/// Domain rule violations come back as structured JSON with a stable
/// error code. A transition guard miss means the caller raced another
/// writer, reported as a conflict. Anything else is an internal error.
fn workflow_error_response(
    action: &str,
    key: &str,
    e: anyhow::Error,
) -> (StatusCode, Json<serde_json::Value>) {
    match e.downcast::<WorkflowError>() {
        Ok(we) => {
            let status = match &we {
                WorkflowError::OrderNotFound | WorkflowError::NotFound { .. } => {
                    StatusCode::NOT_FOUND
                }
                WorkflowError::InvalidTransition(_) => StatusCode::CONFLICT,
                _ => StatusCode::BAD_REQUEST,
            };
            (
                status,
                Json(json!({
                    "success": false,
                    "error": {
                        "code": we.code(),
                        "message": we.to_string(),
                    }
                })),
            )
        }
        Err(e) => {
            tracing::error!("Failed to {} return {}: {}", action, key, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "error": {
                        "code": "INTERNAL_ERROR",
                        "message": "Internal server error",
                    }
                })),
            )
        }
    }
}
