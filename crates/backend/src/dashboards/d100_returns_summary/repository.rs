//! Aggregation queries behind the returns summary dashboard.
//!
//! Everything here is raw SQL over the a001/a002/a003 tables. Period
//! filters compare `julianday()` values because the scalar columns and
//! the JSON state timestamps use different datetime spellings.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sea_orm::{ConnectionTrait, DatabaseConnection, FromQueryResult, Statement};

use crate::shared::data::db::get_connection;

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Raw aggregation result from SQL query
#[derive(Debug, FromQueryResult)]
pub struct StatusCountRow {
    pub status: String,
    pub cnt: i64,
}

/// Raw aggregation result from SQL query
#[derive(Debug, FromQueryResult)]
pub struct TotalsRow {
    pub return_count: i64,
    pub total_refund_amount: f64,
    pub average_refund_amount: f64,
    pub average_processing_days: f64,
}

/// Raw aggregation result from SQL query
#[derive(Debug, FromQueryResult)]
pub struct SliceRow {
    pub code: Option<String>,
    pub cnt: i64,
}

/// One returned item occurrence inside the period, flattened out of
/// the order's item collection
#[derive(Debug, FromQueryResult)]
pub struct ItemOccurrenceRow {
    pub sku: String,
    pub product_name: String,
    pub reason: Option<String>,
    pub quantity: i64,
}

/// Raw aggregation result from SQL query
#[derive(Debug, FromQueryResult)]
pub struct RestockingRow {
    pub total_received: i64,
    pub total_restocked: i64,
    pub total_disposed: i64,
}

/// Live return counts per lifecycle status, over all non-deleted returns.
pub async fn status_counts() -> Result<Vec<StatusCountRow>> {
    let sql = r#"
        SELECT status, COUNT(*) as cnt
        FROM a002_return_orders
        WHERE is_deleted = 0
        GROUP BY status
    "#;

    let stmt = Statement::from_sql_and_values(sea_orm::DatabaseBackend::Sqlite, sql, []);
    let rows = StatusCountRow::find_by_statement(stmt).all(conn()).await?;
    Ok(rows)
}

/// Headline figures for returns created inside the period.
///
/// Refund money comes from the `refundedAmount` stamped into the state
/// document when a refund is issued; returns that never reached a refund
/// contribute to the count but not to the averages.
pub async fn totals_for_period(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<TotalsRow> {
    let sql = r#"
        SELECT
            COUNT(*) as return_count,
            CAST(COALESCE(SUM(json_extract(state_json, '$.refundedAmount')), 0) AS REAL) as total_refund_amount,
            CAST(COALESCE(AVG(json_extract(state_json, '$.refundedAmount')), 0) AS REAL) as average_refund_amount,
            CAST(COALESCE(AVG(
                julianday(json_extract(state_json, '$.refundedAt')) - julianday(created_at)
            ), 0) AS REAL) as average_processing_days
        FROM a002_return_orders
        WHERE is_deleted = 0
          AND julianday(created_at) >= julianday(?)
          AND julianday(created_at) <= julianday(?)
    "#;

    let stmt = Statement::from_sql_and_values(
        sea_orm::DatabaseBackend::Sqlite,
        sql,
        [start.to_rfc3339().into(), end.to_rfc3339().into()],
    );
    let row = TotalsRow::find_by_statement(stmt).one(conn()).await?;
    Ok(row.unwrap_or(TotalsRow {
        return_count: 0,
        total_refund_amount: 0.0,
        average_refund_amount: 0.0,
        average_processing_days: 0.0,
    }))
}

/// Sales orders created inside the period, for the return-rate denominator.
pub async fn order_count_for_period(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<i64> {
    let sql = r#"
        SELECT COUNT(*) as cnt
        FROM a001_sales_orders
        WHERE is_deleted = 0
          AND julianday(created_at) >= julianday(?)
          AND julianday(created_at) <= julianday(?)
    "#;

    let stmt = Statement::from_sql_and_values(
        sea_orm::DatabaseBackend::Sqlite,
        sql,
        [start.to_rfc3339().into(), end.to_rfc3339().into()],
    );
    let row = conn().query_one(stmt).await?;
    match row {
        Some(row) => Ok(row.try_get::<i64>("", "cnt")?),
        None => Ok(0),
    }
}

/// Return counts grouped by the customer-stated reason.
pub async fn reason_counts(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<SliceRow>> {
    let sql = r#"
        SELECT json_extract(header_json, '$.reason') as code, COUNT(*) as cnt
        FROM a002_return_orders
        WHERE is_deleted = 0
          AND julianday(created_at) >= julianday(?)
          AND julianday(created_at) <= julianday(?)
        GROUP BY code
        ORDER BY cnt DESC
    "#;

    let stmt = Statement::from_sql_and_values(
        sea_orm::DatabaseBackend::Sqlite,
        sql,
        [start.to_rfc3339().into(), end.to_rfc3339().into()],
    );
    let rows = SliceRow::find_by_statement(stmt).all(conn()).await?;
    Ok(rows)
}

/// Inspection counts grouped by recorded condition, for inspections
/// performed inside the period.
pub async fn condition_counts(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<SliceRow>> {
    let sql = r#"
        SELECT condition as code, COUNT(*) as cnt
        FROM a003_inspections
        WHERE is_deleted = 0
          AND julianday(inspected_at) >= julianday(?)
          AND julianday(inspected_at) <= julianday(?)
        GROUP BY condition
        ORDER BY cnt DESC
    "#;

    let stmt = Statement::from_sql_and_values(
        sea_orm::DatabaseBackend::Sqlite,
        sql,
        [start.to_rfc3339().into(), end.to_rfc3339().into()],
    );
    let rows = SliceRow::find_by_statement(stmt).all(conn()).await?;
    Ok(rows)
}

/// Inspection counts grouped by disposition, for inspections performed
/// inside the period.
pub async fn disposition_counts(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<SliceRow>> {
    let sql = r#"
        SELECT disposition as code, COUNT(*) as cnt
        FROM a003_inspections
        WHERE is_deleted = 0
          AND julianday(inspected_at) >= julianday(?)
          AND julianday(inspected_at) <= julianday(?)
        GROUP BY disposition
        ORDER BY cnt DESC
    "#;

    let stmt = Statement::from_sql_and_values(
        sea_orm::DatabaseBackend::Sqlite,
        sql,
        [start.to_rfc3339().into(), end.to_rfc3339().into()],
    );
    let rows = SliceRow::find_by_statement(stmt).all(conn()).await?;
    Ok(rows)
}

/// Every returned item occurrence inside the period, one row per item
/// line, with the order-level reason attached. The per-SKU ranking is
/// folded in the service.
pub async fn item_occurrences(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<ItemOccurrenceRow>> {
    let sql = r#"
        SELECT
            json_extract(je.value, '$.sku') as sku,
            json_extract(je.value, '$.name') as product_name,
            json_extract(header_json, '$.reason') as reason,
            CAST(json_extract(je.value, '$.quantityRequested') AS INTEGER) as quantity
        FROM a002_return_orders, json_each(a002_return_orders.items_json) je
        WHERE is_deleted = 0
          AND julianday(created_at) >= julianday(?)
          AND julianday(created_at) <= julianday(?)
    "#;

    let stmt = Statement::from_sql_and_values(
        sea_orm::DatabaseBackend::Sqlite,
        sql,
        [start.to_rfc3339().into(), end.to_rfc3339().into()],
    );
    let rows = ItemOccurrenceRow::find_by_statement(stmt)
        .all(conn())
        .await?;
    Ok(rows)
}

/// Received / restocked / disposed unit totals for inspections performed
/// inside the period.
pub async fn restocking_counts(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<RestockingRow> {
    let sql = r#"
        SELECT
            COALESCE(SUM(quantity_received), 0) as total_received,
            COALESCE(SUM(CASE WHEN disposition = 'RESTOCK' THEN quantity_received ELSE 0 END), 0) as total_restocked,
            COALESCE(SUM(CASE WHEN disposition = 'DISPOSE' THEN quantity_received ELSE 0 END), 0) as total_disposed
        FROM a003_inspections
        WHERE is_deleted = 0
          AND julianday(inspected_at) >= julianday(?)
          AND julianday(inspected_at) <= julianday(?)
    "#;

    let stmt = Statement::from_sql_and_values(
        sea_orm::DatabaseBackend::Sqlite,
        sql,
        [start.to_rfc3339().into(), end.to_rfc3339().into()],
    );
    let row = RestockingRow::find_by_statement(stmt).one(conn()).await?;
    Ok(row.unwrap_or(RestockingRow {
        total_received: 0,
        total_restocked: 0,
        total_disposed: 0,
    }))
}
