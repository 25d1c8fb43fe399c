use anyhow::Result;
use chrono::Utc;
use contracts::domain::a002_return_order::aggregate::{
    ReturnOrder, ReturnOrderHeader, ReturnOrderId, ReturnOrderListItem, ReturnOrderState,
    ReturnItem,
};
use contracts::domain::common::{AggregateId, BaseAggregate, EntityMetadata};
use contracts::enums::{ReturnReason, ReturnStatus};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult, QueryFilter, Set, Statement,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::data::db::get_connection;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_return_orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub comment: Option<String>,
    pub order_id: String,
    pub order_number: String,
    pub customer_email: String,
    pub status: String,
    pub header_json: String,
    pub items_json: String,
    pub state_json: String,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub updated_at: Option<chrono::DateTime<chrono::Utc>>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for ReturnOrder {
    fn from(m: Model) -> Self {
        let metadata = EntityMetadata {
            created_at: m.created_at.unwrap_or_else(Utc::now),
            updated_at: m.updated_at.unwrap_or_else(Utc::now),
            is_deleted: m.is_deleted,
            version: m.version,
        };
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::new_v4());

        let header: ReturnOrderHeader = serde_json::from_str(&m.header_json)
            .unwrap_or_else(|_| panic!("Failed to deserialize header_json for RMA: {}", m.code));
        let items: Vec<ReturnItem> = serde_json::from_str(&m.items_json)
            .unwrap_or_else(|_| panic!("Failed to deserialize items_json for RMA: {}", m.code));
        let state: ReturnOrderState = serde_json::from_str(&m.state_json)
            .unwrap_or_else(|_| panic!("Failed to deserialize state_json for RMA: {}", m.code));

        ReturnOrder {
            base: BaseAggregate::with_metadata(
                ReturnOrderId(uuid),
                m.code,
                m.description,
                m.comment,
                metadata,
            ),
            header,
            items,
            state,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn get_by_id(id: Uuid) -> Result<Option<ReturnOrder>> {
    let result = Entity::find_by_id(id.to_string()).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn get_by_rma_number(rma_number: &str) -> Result<Option<ReturnOrder>> {
    let result = Entity::find()
        .filter(Column::Code.eq(rma_number))
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

/// Find the return order that carries a given return item
pub async fn get_by_item_id(item_id: &str) -> Result<Option<ReturnOrder>> {
    let stmt = Statement::from_sql_and_values(
        sea_orm::DatabaseBackend::Sqlite,
        r#"
        SELECT * FROM a002_return_orders
        WHERE is_deleted = 0
          AND EXISTS (
              SELECT 1 FROM json_each(a002_return_orders.items_json)
              WHERE json_extract(value, '$.id') = ?
          )
        "#,
        [item_id.into()],
    );
    let result = Model::find_by_statement(stmt).one(conn()).await?;
    Ok(result.map(Into::into))
}

pub async fn insert(aggregate: &ReturnOrder) -> Result<Uuid> {
    let uuid = aggregate.base.id.value();

    let header_json = serde_json::to_string(&aggregate.header)?;
    let items_json = serde_json::to_string(&aggregate.items)?;
    let state_json = serde_json::to_string(&aggregate.state)?;

    let active = ActiveModel {
        id: Set(uuid.to_string()),
        code: Set(aggregate.base.code.clone()),
        description: Set(aggregate.base.description.clone()),
        comment: Set(aggregate.base.comment.clone()),
        order_id: Set(aggregate.header.order_id.clone()),
        order_number: Set(aggregate.header.order_number.clone()),
        customer_email: Set(aggregate.header.customer_email.clone()),
        status: Set(aggregate.state.status.code().to_string()),
        header_json: Set(header_json),
        items_json: Set(items_json),
        state_json: Set(state_json),
        is_deleted: Set(aggregate.base.metadata.is_deleted),
        created_at: Set(Some(aggregate.base.metadata.created_at)),
        updated_at: Set(Some(aggregate.base.metadata.updated_at)),
        version: Set(aggregate.base.metadata.version),
    };
    active.insert(conn()).await?;
    Ok(uuid)
}

/// Conditionally move a return order into `new_state`. The row is only
/// touched while its current status is one of `allowed_from`, so two
/// racing writers cannot both apply a transition from the same stale
/// read; the loser sees `false` and must re-read.
pub async fn update_state_guarded(
    id: Uuid,
    allowed_from: &[ReturnStatus],
    new_state: &ReturnOrderState,
    items: Option<&[ReturnItem]>,
) -> Result<bool> {
    let state_json = serde_json::to_string(new_state)?;
    let allowed_codes: Vec<&str> = allowed_from.iter().map(|s| s.code()).collect();

    let mut update = Entity::update_many()
        .col_expr(Column::Status, Expr::value(new_state.status.code()))
        .col_expr(Column::StateJson, Expr::value(state_json))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .col_expr(Column::Version, Expr::col(Column::Version).add(1));

    if let Some(items) = items {
        let items_json = serde_json::to_string(items)?;
        update = update.col_expr(Column::ItemsJson, Expr::value(items_json));
    }

    let result = update
        .filter(Column::Id.eq(id.to_string()))
        .filter(Column::IsDeleted.eq(false))
        .filter(Column::Status.is_in(allowed_codes))
        .exec(conn())
        .await?;

    Ok(result.rows_affected > 0)
}

pub async fn soft_delete(id: Uuid) -> Result<bool> {
    let result = Entity::update_many()
        .col_expr(Column::IsDeleted, Expr::value(true))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id.to_string()))
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}

fn format_rma_number(year: i32, counter: i64) -> String {
    format!("RMA-{}-{:04}", year, counter)
}

/// Next RMA number for the given year, e.g. "RMA-2025-0042". The
/// counter row is bumped inside a transaction so concurrent creations
/// never share a number.
pub async fn next_rma_number(year: i32) -> Result<String> {
    let txn = conn().begin().await?;

    txn.execute(Statement::from_sql_and_values(
        sea_orm::DatabaseBackend::Sqlite,
        "INSERT INTO a002_rma_counters (year, counter) VALUES (?, 1) \
         ON CONFLICT(year) DO UPDATE SET counter = counter + 1",
        [year.into()],
    ))
    .await?;

    let row = txn
        .query_one(Statement::from_sql_and_values(
            sea_orm::DatabaseBackend::Sqlite,
            "SELECT counter FROM a002_rma_counters WHERE year = ?",
            [year.into()],
        ))
        .await?;
    let counter: i64 = row
        .map(|r| r.try_get("", "counter").unwrap_or(0))
        .unwrap_or(0);

    txn.commit().await?;

    Ok(format_rma_number(year, counter))
}

// ============================================
// SQL-based list with pagination
// ============================================

#[derive(Debug, Clone)]
pub struct ReturnsListQuery {
    pub status: Option<String>,
    pub search: Option<String>,
    pub sort_by: String,
    pub sort_desc: bool,
    pub limit: usize,
    pub offset: usize,
}

#[derive(Debug)]
pub struct ReturnsListResult {
    pub items: Vec<ReturnOrderListItem>,
    pub total: usize,
}

/// SQL-based list with pagination and filtering
pub async fn list_sql(query: ReturnsListQuery) -> Result<ReturnsListResult> {
    let db = get_connection();

    // Build WHERE clause
    let mut conditions = vec!["is_deleted = 0".to_string()];

    if let Some(ref status) = query.status {
        if !status.is_empty() {
            conditions.push(format!("status = '{}'", status.replace('\'', "''")));
        }
    }
    if let Some(ref search) = query.search {
        if !search.is_empty() {
            let term = search.replace('\'', "''");
            conditions.push(format!(
                "(code LIKE '%{term}%' OR order_number LIKE '%{term}%' OR customer_email LIKE '%{term}%')"
            ));
        }
    }

    let where_clause = conditions.join(" AND ");

    // Map sort field to SQL expression
    let sort_column = match query.sort_by.as_str() {
        "rma_number" => "code",
        "order_number" => "order_number",
        "customer_email" => "customer_email",
        "status" => "status",
        "estimated_refund" => "json_extract(header_json, '$.estimatedRefund')",
        "updated_at" => "updated_at",
        _ => "created_at",
    };
    let sort_order = if query.sort_desc { "DESC" } else { "ASC" };

    // Count total
    let count_sql = format!(
        "SELECT COUNT(*) as cnt FROM a002_return_orders WHERE {}",
        where_clause
    );
    let count_stmt = Statement::from_string(sea_orm::DatabaseBackend::Sqlite, count_sql);
    let count_result = db.query_one(count_stmt).await?;
    let total: usize = count_result
        .map(|row| row.try_get::<i64>("", "cnt").unwrap_or(0) as usize)
        .unwrap_or(0);

    // Fetch paginated data
    let select_sql = format!(
        r#"
        SELECT
            id,
            code,
            order_number,
            customer_email,
            status,
            json_extract(header_json, '$.reason') as reason,
            json_array_length(items_json) as item_count,
            (SELECT COALESCE(SUM(json_extract(je.value, '$.quantityRequested')), 0)
             FROM json_each(a002_return_orders.items_json) je) as total_quantity,
            json_extract(header_json, '$.estimatedRefund') as estimated_refund,
            json_extract(state_json, '$.refundedAmount') as refunded_amount,
            created_at,
            updated_at
        FROM a002_return_orders
        WHERE {}
        ORDER BY {} {}
        LIMIT {} OFFSET {}
        "#,
        where_clause, sort_column, sort_order, query.limit, query.offset
    );

    let stmt = Statement::from_string(sea_orm::DatabaseBackend::Sqlite, select_sql);
    let rows = db.query_all(stmt).await?;

    let items: Vec<ReturnOrderListItem> = rows
        .into_iter()
        .filter_map(|row| {
            let id: String = row.try_get("", "id").ok()?;
            let rma_number: String = row.try_get("", "code").ok()?;
            let order_number: String = row.try_get("", "order_number").ok()?;
            let customer_email: String = row.try_get("", "customer_email").ok()?;
            let status_code: String = row.try_get("", "status").ok()?;
            let status = ReturnStatus::from_code(&status_code)?;
            let reason_code: String = row.try_get("", "reason").unwrap_or_default();
            let reason = ReturnReason::from_code(&reason_code).unwrap_or(ReturnReason::Other);
            let item_count: i64 = row.try_get("", "item_count").unwrap_or(0);
            let total_quantity: i64 = row.try_get("", "total_quantity").unwrap_or(0);
            let estimated_refund: f64 = row.try_get("", "estimated_refund").unwrap_or(0.0);
            let refunded_amount: Option<f64> = row.try_get("", "refunded_amount").ok();
            let created_at = row
                .try_get::<chrono::DateTime<chrono::Utc>>("", "created_at")
                .ok();
            let updated_at = row
                .try_get::<chrono::DateTime<chrono::Utc>>("", "updated_at")
                .ok();

            Some(ReturnOrderListItem {
                id,
                rma_number,
                order_number,
                customer_email,
                status,
                reason,
                item_count: item_count as i32,
                total_quantity: total_quantity as i32,
                estimated_refund,
                refunded_amount,
                created_at,
                updated_at,
            })
        })
        .collect();

    Ok(ReturnsListResult { items, total })
}

#[cfg(test)]
mod tests {
    use super::format_rma_number;

    #[test]
    fn rma_numbers_are_zero_padded_to_four_digits() {
        assert_eq!(format_rma_number(2025, 1), "RMA-2025-0001");
        assert_eq!(format_rma_number(2025, 42), "RMA-2025-0042");
        assert_eq!(format_rma_number(2026, 9999), "RMA-2026-9999");
    }

    #[test]
    fn rma_counter_overflowing_four_digits_keeps_growing() {
        assert_eq!(format_rma_number(2025, 10000), "RMA-2025-10000");
    }
}
