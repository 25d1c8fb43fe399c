use anyhow::Result;
use chrono::{Datelike, Utc};
use contracts::domain::a002_return_order::aggregate::{
    ReturnItem, ReturnOrder, ReturnOrderHeader,
};
use contracts::enums::{ReturnItemStatus, ReturnStatus};
use contracts::policy::evaluate_order;
use contracts::usecases::common::error::WorkflowError;
use contracts::usecases::u102_create_return::{
    request::CreateReturnRequest,
    response::{CreateReturnResponse, CreatedReturn},
};
use std::collections::HashSet;
use uuid::Uuid;

use crate::domain::{a001_sales_order, a002_return_order};
use crate::shared::config::return_policy;
use crate::shared::logger;

/// Customer-facing return creation: validates eligibility and
/// availability, reserves units on the order lines, numbers the RMA
/// and writes the return order in PENDING or, under the auto-approve
/// threshold, directly in APPROVED.
pub struct CreateReturnExecutor;

impl CreateReturnExecutor {
    pub fn new() -> Self {
        Self
    }

    pub async fn execute(&self, request: CreateReturnRequest) -> Result<CreateReturnResponse> {
        match self.create(request).await {
            Ok(created) => Ok(CreateReturnResponse::created(created)),
            Err(e) => match e.downcast::<WorkflowError>() {
                Ok(we) => Ok(CreateReturnResponse::failed(we.code(), we.to_string())),
                Err(infra) => Err(infra),
            },
        }
    }

    async fn create(&self, request: CreateReturnRequest) -> Result<CreatedReturn> {
        let policy = return_policy();

        let order_id = Uuid::parse_str(&request.order_id)
            .map_err(|_| WorkflowError::validation("Invalid order id"))?;
        let order = a001_sales_order::repository::get_by_id(order_id)
            .await?
            .ok_or(WorkflowError::OrderNotFound)?;

        // The creation endpoint is public; re-verify the caller knows
        // the e-mail on the order, same opaque failure as the lookup.
        if !order
            .customer_email
            .trim()
            .eq_ignore_ascii_case(request.customer_email.trim())
        {
            return Err(WorkflowError::OrderNotFound.into());
        }

        let eligibility =
            evaluate_order(&order.order_status, order.shipped_at, Utc::now(), policy);
        if !eligibility.is_eligible {
            return Err(WorkflowError::ineligible(
                eligibility
                    .reason
                    .unwrap_or_else(|| "order is not eligible for return".to_string()),
            )
            .into());
        }

        if request.items.is_empty() {
            return Err(WorkflowError::validation("At least one item must be selected").into());
        }
        let mut seen = HashSet::new();
        for item in &request.items {
            if !seen.insert(item.product_variant_id.as_str()) {
                return Err(WorkflowError::validation(format!(
                    "Product variant {} is listed more than once",
                    item.product_variant_id
                ))
                .into());
            }
        }

        let mut items = Vec::with_capacity(request.items.len());
        for req_item in &request.items {
            let line = order
                .find_line_by_variant(&req_item.product_variant_id)
                .ok_or_else(|| {
                    WorkflowError::validation(format!(
                        "Order has no line for product variant {}",
                        req_item.product_variant_id
                    ))
                })?;
            if req_item.quantity_requested <= 0 {
                return Err(WorkflowError::validation(format!(
                    "Quantity for {} must be positive",
                    line.sku
                ))
                .into());
            }
            if req_item.quantity_requested > line.quantity_available() {
                return Err(WorkflowError::ineligible(format!(
                    "Only {} unit(s) of {} can still be returned",
                    line.quantity_available(),
                    line.sku
                ))
                .into());
            }
            items.push(ReturnItem {
                id: Uuid::new_v4().to_string(),
                order_line_id: line.id.clone(),
                product_variant_id: line.product_variant_id.clone(),
                sku: line.sku.clone(),
                name: line.name.clone(),
                quantity_requested: req_item.quantity_requested,
                unit_price: line.unit_price,
                status: ReturnItemStatus::Pending,
            });
        }

        let estimated_refund: f64 = items
            .iter()
            .map(|i| i.quantity_requested as f64 * i.unit_price)
            .sum();
        let approval_required = policy.requires_approval(estimated_refund);
        let initial_status = if approval_required {
            ReturnStatus::Pending
        } else {
            ReturnStatus::Approved
        };

        // Reserve units under the availability guard. All-or-nothing:
        // a single miss rolls back every reservation taken so far.
        let mut reserved: Vec<(String, i32)> = Vec::new();
        for item in &items {
            match a001_sales_order::repository::reserve_line_quantity(
                &item.order_line_id,
                item.quantity_requested,
            )
            .await
            {
                Ok(true) => reserved.push((item.order_line_id.clone(), item.quantity_requested)),
                Ok(false) => {
                    release_reservations(&reserved).await;
                    return Err(WorkflowError::ineligible(format!(
                        "{} is no longer available in the requested quantity",
                        item.sku
                    ))
                    .into());
                }
                Err(e) => {
                    release_reservations(&reserved).await;
                    return Err(e);
                }
            }
        }

        let header = ReturnOrderHeader {
            order_id: order.to_string_id(),
            order_number: order.order_number.clone(),
            customer_email: order.customer_email.clone(),
            reason: request.reason,
            reason_details: request.reason_details.clone(),
            refund_method: request.refund_method,
            approval_required,
            estimated_refund,
        };

        match self
            .persist(header, items, initial_status, approval_required)
            .await
        {
            Ok(created) => Ok(created),
            Err(e) => {
                release_reservations(&reserved).await;
                Err(e)
            }
        }
    }

    async fn persist(
        &self,
        header: ReturnOrderHeader,
        items: Vec<ReturnItem>,
        initial_status: ReturnStatus,
        approval_required: bool,
    ) -> Result<CreatedReturn> {
        let year = Utc::now().year();
        let rma_number = a002_return_order::repository::next_rma_number(year).await?;

        let mut return_order =
            ReturnOrder::new_for_insert(rma_number.clone(), header, items, initial_status);
        if initial_status == ReturnStatus::Approved {
            return_order.state.approved_at = Some(Utc::now());
            return_order.state.approved_by = Some("system".to_string());
        }

        return_order
            .validate()
            .map_err(WorkflowError::validation)?;
        return_order.before_write();

        let id = a002_return_order::repository::insert(&return_order).await?;

        let note = if approval_required {
            None
        } else {
            Some("Auto-approved: estimated refund within policy threshold".to_string())
        };
        a002_return_order::events::append(id, "CREATE", None, initial_status, "customer", note)
            .await?;

        logger::log(
            "returns",
            &format!(
                "Created {} for order {} ({})",
                rma_number,
                return_order.header.order_number,
                initial_status.code()
            ),
        );

        Ok(CreatedReturn {
            id: id.to_string(),
            rma_number,
            status: initial_status,
            approval_required,
        })
    }
}

async fn release_reservations(reserved: &[(String, i32)]) {
    for (line_id, quantity) in reserved {
        if let Err(e) =
            a001_sales_order::repository::release_line_quantity(line_id, *quantity).await
        {
            tracing::error!(
                "Failed to release {} reserved unit(s) on line {}: {}",
                quantity,
                line_id,
                e
            );
        }
    }
}
