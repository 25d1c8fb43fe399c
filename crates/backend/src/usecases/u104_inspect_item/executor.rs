use anyhow::Result;
use chrono::Utc;
use contracts::domain::a002_return_order::lifecycle::{
    allowed_sources, apply, InvalidTransition, ReturnEvent,
};
use contracts::domain::a003_inspection::aggregate::Inspection;
use contracts::enums::{ReturnItemStatus, ReturnStatus};
use contracts::policy::summarize_inspections;
use contracts::usecases::common::error::WorkflowError;
use contracts::usecases::u104_inspect_item::{
    request::InspectItemRequest, response::InspectItemResponse,
};

use crate::domain::{a002_return_order, a003_inspection};
use crate::shared::config::return_policy;
use crate::shared::logger;

/// Warehouse inspection of one return item: records the verdict
/// (quantity, condition, disposition), marks the item inspected, and
/// drives the order RECEIVED -> INSPECTING -> INSPECTION_COMPLETE as
/// the first and last verdicts land. Re-inspecting an item while the
/// order is still INSPECTING replaces the earlier verdict.
pub struct InspectItemExecutor;

impl InspectItemExecutor {
    pub fn new() -> Self {
        Self
    }

    pub async fn execute(
        &self,
        return_item_id: &str,
        request: InspectItemRequest,
        actor: &str,
    ) -> Result<InspectItemResponse> {
        match self.inspect(return_item_id, request, actor).await {
            Ok((inspection, summary, order_status)) => {
                Ok(InspectItemResponse::inspected(inspection, summary, order_status))
            }
            Err(e) => match e.downcast::<WorkflowError>() {
                Ok(we) => Ok(InspectItemResponse::failed(we.code(), we.to_string())),
                Err(infra) => Err(infra),
            },
        }
    }

    async fn inspect(
        &self,
        return_item_id: &str,
        request: InspectItemRequest,
        actor: &str,
    ) -> Result<(
        Inspection,
        contracts::policy::InspectionSummary,
        ReturnStatus,
    )> {
        let policy = return_policy();

        let mut order = a002_return_order::repository::get_by_item_id(return_item_id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Return item"))?;

        let from = order.state.status;
        let begins_inspection = match from {
            ReturnStatus::Received => true,
            ReturnStatus::Inspecting => false,
            _ => {
                return Err(WorkflowError::from(InvalidTransition {
                    current: from,
                    event: ReturnEvent::BeginInspection,
                    allowed: allowed_sources(ReturnEvent::BeginInspection),
                })
                .into());
            }
        };

        let item = order
            .find_item(return_item_id)
            .ok_or_else(|| WorkflowError::not_found("Return item"))?
            .clone();

        if request.quantity_received < 0 {
            return Err(
                WorkflowError::validation("Received quantity cannot be negative").into(),
            );
        }
        if request.quantity_received > item.quantity_requested {
            return Err(WorkflowError::validation(format!(
                "Cannot receive {} unit(s) of {}: only {} were requested",
                request.quantity_received, item.sku, item.quantity_requested
            ))
            .into());
        }

        let disposition = match request.disposition {
            Some(d) => d,
            None => policy
                .default_disposition_for(request.condition)
                .ok_or_else(|| {
                    WorkflowError::validation("A disposition is required for this item")
                })?,
        };

        let inspection = Inspection::new_for_insert(
            format!("INSP-{}-{}", order.rma_number(), item.sku),
            order.to_string_id(),
            return_item_id.to_string(),
            request.quantity_received,
            request.condition,
            request.condition_notes.clone(),
            disposition,
            request.disposition_notes.clone(),
            request.restock_location_id.clone(),
            request.photo_urls.clone(),
            Some(actor.to_string()),
        );
        a003_inspection::service::save(inspection).await?;

        // Mark the item and work out where the order lands: first
        // verdict starts the inspection, last verdict completes it.
        if let Some(item) = order.find_item_mut(return_item_id) {
            item.status = ReturnItemStatus::Inspected;
        }
        let completes_inspection = order.all_items_inspected();
        let final_status = if completes_inspection {
            ReturnStatus::InspectionComplete
        } else {
            ReturnStatus::Inspecting
        };

        order.state.status = final_status;
        order.state.inspected_at = Some(Utc::now());
        order.state.inspected_by = Some(actor.to_string());

        let id = order.base.id.value();
        let updated = a002_return_order::repository::update_state_guarded(
            id,
            &[ReturnStatus::Received, ReturnStatus::Inspecting],
            &order.state,
            Some(&order.items),
        )
        .await?;
        if !updated {
            let current = a002_return_order::repository::get_by_id(id)
                .await?
                .map(|o| o.state.status)
                .unwrap_or(from);
            return Err(WorkflowError::from(InvalidTransition {
                current,
                event: ReturnEvent::BeginInspection,
                allowed: allowed_sources(ReturnEvent::BeginInspection),
            })
            .into());
        }

        if begins_inspection {
            a002_return_order::events::append(
                id,
                ReturnEvent::BeginInspection.code(),
                Some(ReturnStatus::Received),
                ReturnStatus::Inspecting,
                actor,
                None,
            )
            .await?;
        }
        a002_return_order::events::append(
            id,
            "INSPECT_ITEM",
            Some(ReturnStatus::Inspecting),
            ReturnStatus::Inspecting,
            actor,
            Some(format!(
                "{}: {} x{}, disposition {}",
                item.sku,
                request.condition.code(),
                request.quantity_received,
                disposition.code()
            )),
        )
        .await?;
        if completes_inspection {
            a002_return_order::events::append(
                id,
                ReturnEvent::CompleteInspection.code(),
                Some(ReturnStatus::Inspecting),
                ReturnStatus::InspectionComplete,
                actor,
                None,
            )
            .await?;
        }

        logger::log(
            "returns",
            &format!(
                "{}: inspected {} ({} remaining)",
                order.rma_number(),
                item.sku,
                order.pending_items().len()
            ),
        );

        // Re-read the verdicts and build the running summary
        let inspections =
            a003_inspection::repository::list_for_return(&order.to_string_id()).await?;
        let inspected_items = a003_inspection::service::to_inspected_items(&order, &inspections);
        let summary = summarize_inspections(
            &order.to_string_id(),
            order.items.len() as i32,
            &inspected_items,
            order.header.reason,
            policy,
        );

        let saved = a003_inspection::repository::get_by_return_item(return_item_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Inspection disappeared after save"))?;

        Ok((saved, summary, final_status))
    }
}
