use anyhow::Result;
use chrono::Utc;
use contracts::domain::a001_sales_order::aggregate::{SalesOrder, SalesOrderId, SalesOrderLine};
use contracts::domain::common::{AggregateId, BaseAggregate, EntityMetadata};
use sea_orm::entity::prelude::*;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, Statement,
};
use uuid::Uuid;

use crate::shared::data::db::get_connection;

mod orders {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "a001_sales_orders")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub code: String,
        pub description: String,
        pub comment: Option<String>,
        pub order_number: String,
        pub customer_name: String,
        pub customer_email: String,
        pub order_status: String,
        pub shipped_at: Option<chrono::DateTime<chrono::Utc>>,
        pub is_deleted: bool,
        pub created_at: Option<chrono::DateTime<chrono::Utc>>,
        pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
        pub version: i32,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

mod lines {
    use sea_orm::entity::prelude::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
    #[sea_orm(table_name = "a001_sales_order_lines")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub order_id: String,
        pub product_variant_id: String,
        pub sku: String,
        pub name: String,
        pub quantity: i32,
        pub quantity_returned: i32,
        pub unit_price: f64,
        pub image_url: Option<String>,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

impl From<lines::Model> for SalesOrderLine {
    fn from(m: lines::Model) -> Self {
        SalesOrderLine {
            id: m.id,
            product_variant_id: m.product_variant_id,
            sku: m.sku,
            name: m.name,
            quantity: m.quantity,
            quantity_returned: m.quantity_returned,
            unit_price: m.unit_price,
            image_url: m.image_url,
        }
    }
}

fn assemble(m: orders::Model, line_models: Vec<lines::Model>) -> SalesOrder {
    let metadata = EntityMetadata {
        created_at: m.created_at.unwrap_or_else(Utc::now),
        updated_at: m.updated_at.unwrap_or_else(Utc::now),
        is_deleted: m.is_deleted,
        version: m.version,
    };
    let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

    SalesOrder {
        base: BaseAggregate::with_metadata(
            SalesOrderId::new(uuid),
            m.code,
            m.description,
            m.comment,
            metadata,
        ),
        order_number: m.order_number,
        customer_name: m.customer_name,
        customer_email: m.customer_email,
        order_status: m.order_status,
        shipped_at: m.shipped_at,
        lines: line_models.into_iter().map(Into::into).collect(),
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

async fn load_lines(order_id: &str) -> Result<Vec<lines::Model>> {
    let models = lines::Entity::find()
        .filter(lines::Column::OrderId.eq(order_id))
        .order_by_asc(lines::Column::Sku)
        .all(conn())
        .await?;
    Ok(models)
}

pub async fn get_by_id(id: Uuid) -> Result<Option<SalesOrder>> {
    let result = orders::Entity::find_by_id(id.to_string())
        .one(conn())
        .await?;
    match result {
        Some(m) => {
            let line_models = load_lines(&m.id).await?;
            Ok(Some(assemble(m, line_models)))
        }
        None => Ok(None),
    }
}

pub async fn get_by_order_number(order_number: &str) -> Result<Option<SalesOrder>> {
    let result = orders::Entity::find()
        .filter(orders::Column::OrderNumber.eq(order_number))
        .filter(orders::Column::IsDeleted.eq(false))
        .one(conn())
        .await?;
    match result {
        Some(m) => {
            let line_models = load_lines(&m.id).await?;
            Ok(Some(assemble(m, line_models)))
        }
        None => Ok(None),
    }
}

pub async fn list_all() -> Result<Vec<SalesOrder>> {
    let order_models = orders::Entity::find()
        .filter(orders::Column::IsDeleted.eq(false))
        .order_by_desc(orders::Column::UpdatedAt)
        .limit(1000)
        .all(conn())
        .await?;

    let mut result = Vec::with_capacity(order_models.len());
    for m in order_models {
        let line_models = load_lines(&m.id).await?;
        result.push(assemble(m, line_models));
    }
    Ok(result)
}

pub async fn count_all() -> Result<u64> {
    let count = orders::Entity::find()
        .filter(orders::Column::IsDeleted.eq(false))
        .count(conn())
        .await?;
    Ok(count)
}

pub async fn insert(order: &SalesOrder) -> Result<Uuid> {
    let uuid = order.base.id.value();

    let active = orders::ActiveModel {
        id: Set(order.base.id.as_string()),
        code: Set(order.base.code.clone()),
        description: Set(order.base.description.clone()),
        comment: Set(order.base.comment.clone()),
        order_number: Set(order.order_number.clone()),
        customer_name: Set(order.customer_name.clone()),
        customer_email: Set(order.customer_email.clone()),
        order_status: Set(order.order_status.clone()),
        shipped_at: Set(order.shipped_at),
        is_deleted: Set(order.base.metadata.is_deleted),
        created_at: Set(Some(order.base.metadata.created_at)),
        updated_at: Set(Some(order.base.metadata.updated_at)),
        version: Set(order.base.metadata.version),
    };
    active.insert(conn()).await?;

    for line in &order.lines {
        let active = lines::ActiveModel {
            id: Set(line.id.clone()),
            order_id: Set(order.base.id.as_string()),
            product_variant_id: Set(line.product_variant_id.clone()),
            sku: Set(line.sku.clone()),
            name: Set(line.name.clone()),
            quantity: Set(line.quantity),
            quantity_returned: Set(line.quantity_returned),
            unit_price: Set(line.unit_price),
            image_url: Set(line.image_url.clone()),
        };
        active.insert(conn()).await?;
    }

    Ok(uuid)
}

/// Commit units of a line to a return. The guard keeps the committed
/// total within the sold quantity, so two concurrent requests cannot
/// both take the last unit.
pub async fn reserve_line_quantity(line_id: &str, quantity: i32) -> Result<bool> {
    let result = conn()
        .execute(Statement::from_sql_and_values(
            sea_orm::DatabaseBackend::Sqlite,
            "UPDATE a001_sales_order_lines \
             SET quantity_returned = quantity_returned + ? \
             WHERE id = ? AND quantity - quantity_returned >= ?",
            [quantity.into(), line_id.into(), quantity.into()],
        ))
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Hand units of a line back after a cancelled return
pub async fn release_line_quantity(line_id: &str, quantity: i32) -> Result<()> {
    conn()
        .execute(Statement::from_sql_and_values(
            sea_orm::DatabaseBackend::Sqlite,
            "UPDATE a001_sales_order_lines \
             SET quantity_returned = MAX(0, quantity_returned - ?) \
             WHERE id = ?",
            [quantity.into(), line_id.into()],
        ))
        .await?;
    Ok(())
}
