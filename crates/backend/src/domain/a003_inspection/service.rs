use super::repository;
use anyhow::Result;
use contracts::domain::a002_return_order::aggregate::ReturnOrder;
use contracts::domain::a003_inspection::aggregate::Inspection;
use contracts::policy::InspectedItem;
use uuid::Uuid;

pub async fn get_by_id(id: Uuid) -> Result<Option<Inspection>> {
    repository::get_by_id(id).await
}

pub async fn get_by_return_item(return_item_id: &str) -> Result<Option<Inspection>> {
    repository::get_by_return_item(return_item_id).await
}

pub async fn list_for_return(return_order_id: &str) -> Result<Vec<Inspection>> {
    repository::list_for_return(return_order_id).await
}

/// Pair each verdict with the return item it covers, pulling the sku,
/// name and unit price the refund math needs from the order. Verdicts
/// whose item no longer exists on the order are skipped.
pub fn to_inspected_items(order: &ReturnOrder, inspections: &[Inspection]) -> Vec<InspectedItem> {
    inspections
        .iter()
        .filter_map(|inspection| {
            let item = order.find_item(&inspection.return_item_id)?;
            Some(InspectedItem {
                return_item_id: inspection.return_item_id.clone(),
                sku: item.sku.clone(),
                product_name: item.name.clone(),
                quantity_received: inspection.quantity_received,
                unit_price: item.unit_price,
                condition: inspection.condition,
                disposition: inspection.disposition,
            })
        })
        .collect()
}

pub async fn save(mut inspection: Inspection) -> Result<Uuid> {
    inspection
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    inspection.before_write();

    let id = repository::upsert_by_return_item(&inspection).await?;

    tracing::info!(
        "Saved inspection {} for return item {}",
        id,
        inspection.return_item_id
    );
    Ok(id)
}
