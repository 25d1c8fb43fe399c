use axum::{extract::Path, Json};
use once_cell::sync::Lazy;
use std::sync::Arc;

use contracts::usecases::common::error::WorkflowError;

use crate::system::auth::extractor::CurrentUser;
use crate::usecases;

// ============================================================================
// UseCase u101: Lookup Order
// ============================================================================

static LOOKUP_ORDER_EXECUTOR: Lazy<Arc<usecases::u101_lookup_order::executor::LookupOrderExecutor>> =
    Lazy::new(|| Arc::new(usecases::u101_lookup_order::executor::LookupOrderExecutor::new()));

/// POST /api/returns/lookup-order
///
/// Customer-facing, no authentication. Failures land in the response
/// envelope so the portal can show them without inspecting HTTP codes.
pub async fn u101_lookup_order(
    Json(request): Json<contracts::usecases::u101_lookup_order::LookupOrderRequest>,
) -> Result<Json<contracts::usecases::u101_lookup_order::LookupOrderResponse>, axum::http::StatusCode>
{
    match LOOKUP_ORDER_EXECUTOR.execute(request).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tracing::error!("Failed to look up order: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

// ============================================================================
// UseCase u102: Create Return
// ============================================================================

static CREATE_RETURN_EXECUTOR: Lazy<
    Arc<usecases::u102_create_return::executor::CreateReturnExecutor>,
> = Lazy::new(|| Arc::new(usecases::u102_create_return::executor::CreateReturnExecutor::new()));

/// POST /api/returns/create
///
/// Customer-facing, no authentication.
pub async fn u102_create_return(
    Json(request): Json<contracts::usecases::u102_create_return::CreateReturnRequest>,
) -> Result<Json<contracts::usecases::u102_create_return::CreateReturnResponse>, axum::http::StatusCode>
{
    match CREATE_RETURN_EXECUTOR.execute(request).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tracing::error!("Failed to create return: {}", e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

// ============================================================================
// UseCase u103: Receive Package
// ============================================================================

static RECEIVE_PACKAGE_EXECUTOR: Lazy<
    Arc<usecases::u103_receive_package::executor::ReceivePackageExecutor>,
> = Lazy::new(|| Arc::new(usecases::u103_receive_package::executor::ReceivePackageExecutor::new()));

/// POST /api/returns/:rma_number/receive
///
/// The body is optional; receiving without a tracking number is the
/// common case at the warehouse dock.
pub async fn u103_receive_package(
    Path(rma_number): Path<String>,
    CurrentUser(claims): CurrentUser,
    body: Option<Json<contracts::usecases::u103_receive_package::ReceivePackageRequest>>,
) -> Result<
    Json<contracts::usecases::u103_receive_package::ReceivePackageResponse>,
    axum::http::StatusCode,
> {
    let request = body.map(|Json(b)| b).unwrap_or_default();
    match RECEIVE_PACKAGE_EXECUTOR
        .execute(&rma_number, request, &claims.username)
        .await
    {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tracing::error!("Failed to receive package for {}: {}", rma_number, e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

// ============================================================================
// UseCase u104: Inspect Item
// ============================================================================

static INSPECT_ITEM_EXECUTOR: Lazy<Arc<usecases::u104_inspect_item::executor::InspectItemExecutor>> =
    Lazy::new(|| Arc::new(usecases::u104_inspect_item::executor::InspectItemExecutor::new()));

/// POST /api/returns/items/:item_id/inspect
pub async fn u104_inspect_item(
    Path(item_id): Path<String>,
    CurrentUser(claims): CurrentUser,
    Json(request): Json<contracts::usecases::u104_inspect_item::InspectItemRequest>,
) -> Result<Json<contracts::usecases::u104_inspect_item::InspectItemResponse>, axum::http::StatusCode>
{
    match INSPECT_ITEM_EXECUTOR
        .execute(&item_id, request, &claims.username)
        .await
    {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tracing::error!("Failed to inspect item {}: {}", item_id, e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

// ============================================================================
// UseCase u105: Process Refund
// ============================================================================

static PROCESS_REFUND_EXECUTOR: Lazy<
    Arc<usecases::u105_process_refund::executor::ProcessRefundExecutor>,
> = Lazy::new(|| Arc::new(usecases::u105_process_refund::executor::ProcessRefundExecutor::new()));

/// POST /api/returns/:rma_number/refund
///
/// The executor works on the order id, so the RMA number from the URL
/// is resolved first. An unknown RMA comes back in the same failure
/// envelope the executor uses.
pub async fn u105_process_refund(
    Path(rma_number): Path<String>,
    CurrentUser(claims): CurrentUser,
    body: Option<Json<contracts::usecases::u105_process_refund::ProcessRefundRequest>>,
) -> Result<
    Json<contracts::usecases::u105_process_refund::ProcessRefundResponse>,
    axum::http::StatusCode,
> {
    let order = match crate::domain::a002_return_order::service::get_by_rma_number(&rma_number).await
    {
        Ok(order) => order,
        Err(e) => {
            tracing::error!("Failed to load return order {}: {}", rma_number, e);
            return Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let Some(order) = order else {
        let err = WorkflowError::not_found("Return order");
        return Ok(Json(
            contracts::usecases::u105_process_refund::ProcessRefundResponse::failed(
                err.code(),
                err.to_string(),
            ),
        ));
    };

    let request = body.map(|Json(b)| b).unwrap_or_default();
    match PROCESS_REFUND_EXECUTOR
        .execute(order.base.id.value(), request, &claims.username)
        .await
    {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            tracing::error!("Failed to process refund for {}: {}", rma_number, e);
            Err(axum::http::StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
