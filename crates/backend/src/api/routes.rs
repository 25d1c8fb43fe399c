use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::api::handlers;
use crate::system;
use crate::system::auth::middleware::{require_auth, require_warehouse};

/// All application routes.
///
/// The customer portal endpoints are public. Everything staff-facing
/// sits behind token auth, and the physical warehouse steps require
/// the warehouse role on top of that.
pub fn configure_routes() -> Router {
    Router::new()
        // ========================================
        // CUSTOMER PORTAL (PUBLIC)
        // ========================================
        .route(
            "/api/returns/lookup-order",
            post(handlers::usecases::u101_lookup_order),
        )
        .route(
            "/api/returns/create",
            post(handlers::usecases::u102_create_return),
        )
        // ========================================
        // STAFF: RETURNS LIST AND DETAIL
        // ========================================
        .route(
            "/api/returns",
            get(handlers::a002_return_order::list_returns)
                .layer(middleware::from_fn(require_auth)),
        )
        .route(
            "/api/returns/:rma_number",
            get(handlers::a002_return_order::get_return_detail)
                .layer(middleware::from_fn(require_auth)),
        )
        .route(
            "/api/returns/:rma_number/events",
            get(handlers::a002_return_order::get_return_events)
                .layer(middleware::from_fn(require_auth)),
        )
        // ========================================
        // STAFF: LIFECYCLE ACTIONS
        // ========================================
        .route(
            "/api/returns/:rma_number/approve",
            post(handlers::a002_return_order::approve).layer(middleware::from_fn(require_auth)),
        )
        .route(
            "/api/returns/:rma_number/reject",
            post(handlers::a002_return_order::reject).layer(middleware::from_fn(require_auth)),
        )
        .route(
            "/api/returns/:rma_number/cancel",
            post(handlers::a002_return_order::cancel).layer(middleware::from_fn(require_auth)),
        )
        .route(
            "/api/returns/:rma_number/mark-in-transit",
            post(handlers::a002_return_order::mark_in_transit)
                .layer(middleware::from_fn(require_auth)),
        )
        .route(
            "/api/returns/:rma_number/close",
            post(handlers::a002_return_order::close).layer(middleware::from_fn(require_auth)),
        )
        // ========================================
        // WAREHOUSE: PHYSICAL PROCESSING
        // ========================================
        .route(
            "/api/returns/:rma_number/receive",
            post(handlers::usecases::u103_receive_package)
                .layer(middleware::from_fn(require_warehouse)),
        )
        .route(
            "/api/returns/items/:item_id/inspect",
            post(handlers::usecases::u104_inspect_item)
                .layer(middleware::from_fn(require_warehouse)),
        )
        .route(
            "/api/returns/:rma_number/refund",
            post(handlers::usecases::u105_process_refund)
                .layer(middleware::from_fn(require_warehouse)),
        )
        .route(
            "/api/returns/:rma_number/shelve-restock",
            post(handlers::a002_return_order::shelve_restock)
                .layer(middleware::from_fn(require_warehouse)),
        )
        // ========================================
        // STAFF: SALES ORDERS
        // ========================================
        .route(
            "/api/orders",
            get(handlers::a001_sales_order::list_all).layer(middleware::from_fn(require_auth)),
        )
        .route(
            "/api/orders/:id",
            get(handlers::a001_sales_order::get_by_id).layer(middleware::from_fn(require_auth)),
        )
        .route(
            "/api/orders/testdata",
            post(handlers::a001_sales_order::insert_test_data)
                .layer(middleware::from_fn(require_auth)),
        )
        // ========================================
        // D100 RETURNS SUMMARY DASHBOARD
        // ========================================
        .route(
            "/api/d100/returns_summary",
            get(handlers::d100_returns_summary::get_metrics)
                .layer(middleware::from_fn(require_auth)),
        )
        .route(
            "/api/d100/returns_summary/status_counts",
            get(handlers::d100_returns_summary::get_status_counts)
                .layer(middleware::from_fn(require_auth)),
        )
        // ========================================
        // SYSTEM: AUTH, USERS, LOGS
        // ========================================
        .merge(system::api::routes::configure_system_routes())
}
