use anyhow::Result;
use chrono::Utc;
use contracts::policy::evaluate_order;
use contracts::usecases::common::error::WorkflowError;
use contracts::usecases::u101_lookup_order::{
    request::LookupOrderRequest,
    response::{LookedUpOrder, LookedUpOrderItem, LookupOrderResponse},
};

use crate::domain::a001_sales_order;
use crate::shared::config::return_policy;

/// Customer-facing order lookup. Returns the order with per-line
/// availability and the eligibility verdict, or a single opaque
/// failure that does not reveal whether the order number or the
/// e-mail was the wrong half.
pub struct LookupOrderExecutor;

impl LookupOrderExecutor {
    pub fn new() -> Self {
        Self
    }

    pub async fn execute(&self, request: LookupOrderRequest) -> Result<LookupOrderResponse> {
        let order =
            a001_sales_order::service::lookup_order(&request.order_number, &request.customer_email)
                .await?;

        let Some(order) = order else {
            let err = WorkflowError::OrderNotFound;
            return Ok(LookupOrderResponse::failed(err.code(), err.to_string()));
        };

        let eligibility = evaluate_order(
            &order.order_status,
            order.shipped_at,
            Utc::now(),
            return_policy(),
        );

        let items: Vec<LookedUpOrderItem> = order
            .lines
            .iter()
            .map(|line| LookedUpOrderItem {
                id: line.id.clone(),
                product_variant_id: line.product_variant_id.clone(),
                sku: line.sku.clone(),
                name: line.name.clone(),
                quantity: line.quantity,
                quantity_returned: line.quantity_returned,
                quantity_available: line.quantity_available(),
                unit_price: line.unit_price,
                image_url: line.image_url.clone(),
            })
            .collect();

        let looked_up = LookedUpOrder {
            id: order.to_string_id(),
            order_number: order.order_number.clone(),
            customer_name: order.customer_name.clone(),
            customer_email: order.customer_email.clone(),
            shipped_at: order.shipped_at,
            items,
        };

        Ok(LookupOrderResponse::found(looked_up, eligibility))
    }
}
