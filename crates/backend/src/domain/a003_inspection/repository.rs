use anyhow::Result;
use chrono::Utc;
use contracts::domain::a003_inspection::aggregate::{Inspection, InspectionId};
use contracts::domain::common::{AggregateId, BaseAggregate, EntityMetadata};
use contracts::enums::{ReturnCondition, ReturnDisposition};
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a003_inspections")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub return_order_id: String,
    pub return_item_id: String,
    pub quantity_received: i32,
    pub condition: String,
    pub condition_notes: Option<String>,
    pub disposition: String,
    pub disposition_notes: Option<String>,
    pub restock_location_id: Option<String>,
    pub photo_urls_json: String,
    pub inspected_by: Option<String>,
    pub inspected_at: chrono::DateTime<chrono::Utc>,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Inspection {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        let condition = ReturnCondition::from_code(&m.condition)
            .unwrap_or_else(|| panic!("Unknown condition code for inspection {}: {}", m.id, m.condition));
        let disposition = ReturnDisposition::from_code(&m.disposition).unwrap_or_else(|| {
            panic!("Unknown disposition code for inspection {}: {}", m.id, m.disposition)
        });
        let photo_urls: Vec<String> = serde_json::from_str(&m.photo_urls_json)
            .unwrap_or_else(|_| panic!("Failed to deserialize photo_urls_json for inspection {}", m.id));

        Inspection {
            base: BaseAggregate::with_metadata(
                InspectionId(uuid),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            return_order_id: m.return_order_id,
            return_item_id: m.return_item_id,
            quantity_received: m.quantity_received,
            condition,
            condition_notes: m.condition_notes,
            disposition,
            disposition_notes: m.disposition_notes,
            restock_location_id: m.restock_location_id,
            photo_urls,
            inspected_by: m.inspected_by,
            inspected_at: m.inspected_at,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn get_by_id(id: Uuid) -> Result<Option<Inspection>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn get_by_return_item(return_item_id: &str) -> Result<Option<Inspection>> {
    let result = Entity::find()
        .filter(Column::ReturnItemId.eq(return_item_id))
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

/// All inspection verdicts of a return order, in inspection order
pub async fn list_for_return(return_order_id: &str) -> Result<Vec<Inspection>> {
    let items: Vec<Inspection> = Entity::find()
        .filter(Column::ReturnOrderId.eq(return_order_id))
        .filter(Column::IsDeleted.eq(false))
        .order_by_asc(Column::InspectedAt)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

/// Write a verdict for a return item. One verdict per item: when the
/// item was already inspected the earlier row is replaced in place and
/// the aggregate keeps the original id and created_at.
pub async fn upsert_by_return_item(inspection: &Inspection) -> Result<Uuid> {
    let existing = get_by_return_item(&inspection.return_item_id).await?;
    let photo_urls_json = serde_json::to_string(&inspection.photo_urls)?;

    if let Some(existing_doc) = existing {
        let existing_uuid = existing_doc.base.id.value();
        let active = ActiveModel {
            id: Set(existing_uuid.to_string()),
            code: Set(inspection.base.code.clone()),
            description: Set(inspection.base.description.clone()),
            comment: Set(inspection.base.comment.clone()),
            return_order_id: Set(inspection.return_order_id.clone()),
            return_item_id: Set(inspection.return_item_id.clone()),
            quantity_received: Set(inspection.quantity_received),
            condition: Set(inspection.condition.code().to_string()),
            condition_notes: Set(inspection.condition_notes.clone()),
            disposition: Set(inspection.disposition.code().to_string()),
            disposition_notes: Set(inspection.disposition_notes.clone()),
            restock_location_id: Set(inspection.restock_location_id.clone()),
            photo_urls_json: Set(photo_urls_json),
            inspected_by: Set(inspection.inspected_by.clone()),
            inspected_at: Set(inspection.inspected_at),
            is_deleted: Set(false),
            updated_at: Set(Some(Utc::now())),
            version: Set(existing_doc.base.metadata.version + 1),
            created_at: sea_orm::ActiveValue::NotSet,
        };
        active.update(conn()).await?;
        Ok(existing_uuid)
    } else {
        let uuid = inspection.base.id.value();
        let active = ActiveModel {
            id: Set(uuid.to_string()),
            code: Set(inspection.base.code.clone()),
            description: Set(inspection.base.description.clone()),
            comment: Set(inspection.base.comment.clone()),
            return_order_id: Set(inspection.return_order_id.clone()),
            return_item_id: Set(inspection.return_item_id.clone()),
            quantity_received: Set(inspection.quantity_received),
            condition: Set(inspection.condition.code().to_string()),
            condition_notes: Set(inspection.condition_notes.clone()),
            disposition: Set(inspection.disposition.code().to_string()),
            disposition_notes: Set(inspection.disposition_notes.clone()),
            restock_location_id: Set(inspection.restock_location_id.clone()),
            photo_urls_json: Set(photo_urls_json),
            inspected_by: Set(inspection.inspected_by.clone()),
            inspected_at: Set(inspection.inspected_at),
            is_deleted: Set(false),
            created_at: Set(Some(inspection.base.metadata.created_at)),
            updated_at: Set(Some(inspection.base.metadata.updated_at)),
            version: Set(inspection.base.metadata.version),
        };
        active.insert(conn()).await?;
        Ok(uuid)
    }
}
