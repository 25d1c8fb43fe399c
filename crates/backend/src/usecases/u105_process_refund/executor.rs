use anyhow::Result;
use chrono::Utc;
use contracts::domain::a002_return_order::lifecycle::{
    allowed_sources, apply, InvalidTransition, ReturnEvent,
};
use contracts::enums::{RefundStatus, ReturnStatus};
use contracts::policy::{calculate_refund, is_partial_refund, RefundCalculation};
use contracts::usecases::common::error::WorkflowError;
use contracts::usecases::u105_process_refund::{
    request::ProcessRefundRequest, response::ProcessRefundResponse,
};
use uuid::Uuid;

use crate::domain::{a002_return_order, a003_inspection};
use crate::shared::config::return_policy;
use crate::shared::logger;

/// Refund settlement: prices the inspected items under the policy,
/// moves the order through REFUND_PENDING and settles it as REFUNDED
/// or PARTIALLY_REFUNDED. Refusal to refund an order with uninspected
/// items comes before any state change.
pub struct ProcessRefundExecutor;

impl ProcessRefundExecutor {
    pub fn new() -> Self {
        Self
    }

    pub async fn execute(
        &self,
        return_order_id: Uuid,
        request: ProcessRefundRequest,
        actor: &str,
    ) -> Result<ProcessRefundResponse> {
        match self.refund(return_order_id, request, actor).await {
            Ok((calculation, status, refund_status)) => {
                Ok(ProcessRefundResponse::refunded(calculation, status, refund_status))
            }
            Err(e) => match e.downcast::<WorkflowError>() {
                Ok(we) => Ok(ProcessRefundResponse::failed(we.code(), we.to_string())),
                Err(infra) => Err(infra),
            },
        }
    }

    async fn refund(
        &self,
        return_order_id: Uuid,
        request: ProcessRefundRequest,
        actor: &str,
    ) -> Result<(RefundCalculation, ReturnStatus, RefundStatus)> {
        let policy = return_policy();

        let mut order = a002_return_order::repository::get_by_id(return_order_id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Return order"))?;

        if !order.all_items_inspected() {
            let missing: Vec<String> = order
                .pending_items()
                .iter()
                .map(|i| i.sku.clone())
                .collect();
            return Err(WorkflowError::IncompleteInspection { missing }.into());
        }

        let from = order.state.status;
        apply(from, ReturnEvent::CalculateRefund).map_err(WorkflowError::from)?;

        let inspections =
            a003_inspection::repository::list_for_return(&order.to_string_id()).await?;
        let inspected_items = a003_inspection::service::to_inspected_items(&order, &inspections);

        let shipping_refund = request.shipping_refund.unwrap_or(0.0);
        let calculation = calculate_refund(
            &inspected_items,
            order.header.reason,
            &request.adjustments,
            shipping_refund,
            policy,
        );
        if calculation.final_refund_amount < 0.0 {
            return Err(WorkflowError::validation(
                "Adjustments push the refund below zero",
            )
            .into());
        }

        // First guarded write: the order enters REFUND_PENDING with
        // the breakdown attached, so a crash between the two writes
        // leaves an auditable half-settled state rather than nothing.
        order.state.status = ReturnStatus::RefundPending;
        order.state.refund_status = Some(RefundStatus::Processing);
        order.state.refund_breakdown = Some(calculation.clone());

        let id = order.base.id.value();
        let updated = a002_return_order::repository::update_state_guarded(
            id,
            allowed_sources(ReturnEvent::CalculateRefund),
            &order.state,
            None,
        )
        .await?;
        if !updated {
            let current = a002_return_order::repository::get_by_id(id)
                .await?
                .map(|o| o.state.status)
                .unwrap_or(from);
            return Err(WorkflowError::from(InvalidTransition {
                current,
                event: ReturnEvent::CalculateRefund,
                allowed: allowed_sources(ReturnEvent::CalculateRefund),
            })
            .into());
        }
        a002_return_order::events::append(
            id,
            ReturnEvent::CalculateRefund.code(),
            Some(from),
            ReturnStatus::RefundPending,
            actor,
            Some(format!("Final amount: {:.2}", calculation.final_refund_amount)),
        )
        .await?;

        // Settle: partial when fewer units arrived than were requested
        // or a condition rate trimmed the subtotal.
        let partial = is_partial_refund(
            &inspected_items,
            order.total_quantity_requested(),
            policy,
        );
        let settle_event = if partial {
            ReturnEvent::IssuePartialRefund
        } else {
            ReturnEvent::IssueFullRefund
        };
        let final_status = apply(ReturnStatus::RefundPending, settle_event)
            .map_err(WorkflowError::from)?;
        let refund_status = if partial {
            RefundStatus::Partial
        } else {
            RefundStatus::Completed
        };

        order.state.status = final_status;
        order.state.refund_status = Some(refund_status);
        order.state.refunded_amount = Some(calculation.final_refund_amount);
        order.state.refunded_at = Some(Utc::now());

        let settled = a002_return_order::repository::update_state_guarded(
            id,
            &[ReturnStatus::RefundPending],
            &order.state,
            None,
        )
        .await?;
        if !settled {
            let current = a002_return_order::repository::get_by_id(id)
                .await?
                .map(|o| o.state.status)
                .unwrap_or(ReturnStatus::RefundPending);
            return Err(WorkflowError::from(InvalidTransition {
                current,
                event: settle_event,
                allowed: allowed_sources(settle_event),
            })
            .into());
        }

        let note = match &request.notes {
            Some(notes) => format!(
                "Refunded {:.2}; {}",
                calculation.final_refund_amount, notes
            ),
            None => format!("Refunded {:.2}", calculation.final_refund_amount),
        };
        a002_return_order::events::append(
            id,
            settle_event.code(),
            Some(ReturnStatus::RefundPending),
            final_status,
            actor,
            Some(note),
        )
        .await?;

        logger::log(
            "returns",
            &format!(
                "{}: refunded {:.2} ({})",
                order.rma_number(),
                calculation.final_refund_amount,
                refund_status.code()
            ),
        );

        Ok((calculation, final_status, refund_status))
    }
}
