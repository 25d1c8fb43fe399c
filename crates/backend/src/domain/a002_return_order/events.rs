use anyhow::Result;
use chrono::Utc;
use contracts::domain::a002_return_order::lifecycle::ReturnEventRecord;
use contracts::enums::ReturnStatus;
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "a002_return_events")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub return_order_id: String,
    pub event: String,
    pub from_status: Option<String>,
    pub to_status: String,
    pub actor: String,
    pub note: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ReturnEventRecord {
    fn from(m: Model) -> Self {
        ReturnEventRecord {
            id: m.id,
            return_order_id: m.return_order_id,
            event: m.event,
            from_status: m.from_status,
            to_status: m.to_status,
            actor: m.actor,
            note: m.note,
            created_at: m.created_at,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Append one audit row. The log is append-only; nothing ever updates
/// or deletes these rows.
pub async fn append(
    return_order_id: Uuid,
    event: &str,
    from_status: Option<ReturnStatus>,
    to_status: ReturnStatus,
    actor: &str,
    note: Option<String>,
) -> Result<()> {
    let active = ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        return_order_id: Set(return_order_id.to_string()),
        event: Set(event.to_string()),
        from_status: Set(from_status.map(|s| s.code().to_string())),
        to_status: Set(to_status.code().to_string()),
        actor: Set(actor.to_string()),
        note: Set(note),
        created_at: Set(Utc::now()),
    };
    active.insert(conn()).await?;
    Ok(())
}

/// Audit trail of a return order, newest first
pub async fn list_for_return(return_order_id: Uuid) -> Result<Vec<ReturnEventRecord>> {
    let events: Vec<ReturnEventRecord> = Entity::find()
        .filter(Column::ReturnOrderId.eq(return_order_id.to_string()))
        .order_by_desc(Column::CreatedAt)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(events)
}
