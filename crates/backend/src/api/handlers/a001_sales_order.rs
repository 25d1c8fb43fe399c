use axum::{extract::Path, http::StatusCode, Json};
use uuid::Uuid;

use contracts::domain::a001_sales_order::SalesOrder;

use crate::domain::a001_sales_order::service;

/// GET /api/orders
///
/// Staff-side list of the sales orders returns are drawn from.
pub async fn list_all() -> Result<Json<Vec<SalesOrder>>, StatusCode> {
    match service::list_all().await {
        Ok(orders) => Ok(Json(orders)),
        Err(e) => {
            tracing::error!("Failed to list sales orders: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/orders/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<SalesOrder>, StatusCode> {
    let uuid = Uuid::parse_str(&id).map_err(|_| StatusCode::BAD_REQUEST)?;

    match service::get_by_id(uuid).await {
        Ok(Some(order)) => Ok(Json(order)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to load sales order {}: {}", id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// POST /api/orders/testdata
pub async fn insert_test_data() -> StatusCode {
    match service::insert_test_data().await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::error!("Failed to insert demo orders: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
