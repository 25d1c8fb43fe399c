use anyhow::Result;
use chrono::Utc;
use contracts::domain::a002_return_order::aggregate::ReturnOrder;
use contracts::domain::a002_return_order::lifecycle::{
    allowed_sources, apply, InvalidTransition, ReturnEvent, ReturnEventRecord,
};
use contracts::domain::a002_return_order::ReturnOrderState;
use contracts::usecases::common::error::WorkflowError;
use uuid::Uuid;

use super::{events, repository};
use crate::domain::a001_sales_order;
use crate::shared::logger;

pub async fn get_by_id(id: Uuid) -> Result<Option<ReturnOrder>> {
    repository::get_by_id(id).await
}

pub async fn get_by_rma_number(rma_number: &str) -> Result<Option<ReturnOrder>> {
    repository::get_by_rma_number(rma_number).await
}

pub async fn list(query: repository::ReturnsListQuery) -> Result<repository::ReturnsListResult> {
    repository::list_sql(query).await
}

pub async fn events_for(return_order_id: Uuid) -> Result<Vec<ReturnEventRecord>> {
    events::list_for_return(return_order_id).await
}

/// Run one staff lifecycle event against a return order.
///
/// The flow is load, apply the lifecycle rule, mutate the state block,
/// then write under a status guard. A guard miss means another writer
/// moved the order after our read, so the stale transition is reported
/// the same way as one that was never allowed.
async fn run_transition<F>(
    rma_number: &str,
    event: ReturnEvent,
    actor: &str,
    note: Option<String>,
    mutate: F,
) -> Result<ReturnOrder>
where
    F: FnOnce(&mut ReturnOrderState),
{
    let mut order = repository::get_by_rma_number(rma_number)
        .await?
        .ok_or_else(|| WorkflowError::not_found("Return order"))?;

    let from = order.state.status;
    let to = apply(from, event).map_err(WorkflowError::from)?;

    order.state.status = to;
    mutate(&mut order.state);

    let id = order.base.id.value();
    let updated = repository::update_state_guarded(id, allowed_sources(event), &order.state, None)
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

    events::append(id, event.code(), Some(from), to, actor, note).await?;
    logger::log(
        "returns",
        &format!("{}: {} ({} -> {}) by {}", rma_number, event.code(), from.code(), to.code(), actor),
    );

    order.base.metadata.version += 1;
    Ok(order)
}

pub async fn approve(rma_number: &str, actor: &str, note: Option<String>) -> Result<ReturnOrder> {
    let actor_name = actor.to_string();
    run_transition(rma_number, ReturnEvent::Approve, actor, note, |state| {
        state.approved_at = Some(Utc::now());
        state.approved_by = Some(actor_name);
    })
    .await
}

pub async fn reject(rma_number: &str, actor: &str, note: Option<String>) -> Result<ReturnOrder> {
    run_transition(rma_number, ReturnEvent::Reject, actor, note, |_| {}).await
}

pub async fn mark_in_transit(
    rma_number: &str,
    actor: &str,
    note: Option<String>,
) -> Result<ReturnOrder> {
    run_transition(rma_number, ReturnEvent::MarkInTransit, actor, note, |_| {}).await
}

pub async fn shelve_restock(
    rma_number: &str,
    actor: &str,
    note: Option<String>,
) -> Result<ReturnOrder> {
    run_transition(rma_number, ReturnEvent::ShelveRestock, actor, note, |_| {}).await
}

pub async fn close(rma_number: &str, actor: &str, note: Option<String>) -> Result<ReturnOrder> {
    run_transition(rma_number, ReturnEvent::Close, actor, note, |_| {}).await
}

/// Cancel a pending or approved return and hand the committed units
/// back to the order lines. Units are only released after the guarded
/// write wins, so a lost race never releases anything.
pub async fn cancel(rma_number: &str, actor: &str, note: Option<String>) -> Result<ReturnOrder> {
    let order = run_transition(rma_number, ReturnEvent::Cancel, actor, note, |_| {}).await?;

    for item in &order.items {
        if let Err(e) =
            a001_sales_order::repository::release_line_quantity(&item.order_line_id, item.quantity_requested)
                .await
        {
            tracing::error!(
                "Failed to release {} unit(s) of line {} after cancelling {}: {}",
                item.quantity_requested,
                item.order_line_id,
                rma_number,
                e
            );
        }
    }

    Ok(order)
}
