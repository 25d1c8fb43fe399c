use anyhow::Result;
use chrono::Utc;
use contracts::domain::a002_return_order::lifecycle::{
    allowed_sources, apply, InvalidTransition, ReturnEvent,
};
use contracts::usecases::common::error::WorkflowError;
use contracts::usecases::u103_receive_package::{
    request::ReceivePackageRequest,
    response::{ReceivePackageResponse, ReceivedPackage},
};

use crate::domain::a002_return_order::{events, repository};
use crate::shared::logger;

/// Warehouse receipt scan: stamps the package as received and moves
/// the return to RECEIVED. Only APPROVED or IN_TRANSIT returns can be
/// received; anything else is rejected before any side effect.
pub struct ReceivePackageExecutor;

impl ReceivePackageExecutor {
    pub fn new() -> Self {
        Self
    }

    pub async fn execute(
        &self,
        rma_number: &str,
        request: ReceivePackageRequest,
        actor: &str,
    ) -> Result<ReceivePackageResponse> {
        match self.receive(rma_number, request, actor).await {
            Ok(received) => Ok(ReceivePackageResponse::received(received)),
            Err(e) => match e.downcast::<WorkflowError>() {
                Ok(we) => Ok(ReceivePackageResponse::failed(we.code(), we.to_string())),
                Err(infra) => Err(infra),
            },
        }
    }

    async fn receive(
        &self,
        rma_number: &str,
        request: ReceivePackageRequest,
        actor: &str,
    ) -> Result<ReceivedPackage> {
        let mut order = repository::get_by_rma_number(rma_number)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Return order"))?;

        let event = ReturnEvent::ReceivePackage;
        let from = order.state.status;
        let to = apply(from, event).map_err(WorkflowError::from)?;

        let now = Utc::now();
        order.state.status = to;
        order.state.received_at = Some(now);
        order.state.received_by = Some(actor.to_string());
        if request.tracking_number.is_some() {
            order.state.tracking_number = request.tracking_number.clone();
        }

        let id = order.base.id.value();
        let updated =
            repository::update_state_guarded(id, allowed_sources(event), &order.state, None)
                .await?;
        if !updated {
            let current = repository::get_by_id(id)
                .await?
                .map(|o| o.state.status)
                .unwrap_or(from);
            return Err(WorkflowError::from(InvalidTransition {
                current,
                event,
                allowed: allowed_sources(event),
            })
            .into());
        }

        let note = order
            .state
            .tracking_number
            .as_ref()
            .map(|t| format!("Tracking: {}", t));
        events::append(id, event.code(), Some(from), to, actor, note).await?;
        logger::log(
            "returns",
            &format!("{} received at warehouse by {}", rma_number, actor),
        );

        Ok(ReceivedPackage {
            id: id.to_string(),
            rma_number: rma_number.to_string(),
            status: to,
            received_at: now,
            received_by: Some(actor.to_string()),
        })
    }
}
