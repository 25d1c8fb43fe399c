use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use contracts::dashboards::d100_returns_summary::{
    ConditionSlice, DispositionSlice, MetricsPeriod, MetricsTotals, ReasonSlice,
    RestockingMetrics, ReturnMetrics, ReturnStatusCounts, TopReturnedProduct,
};
use contracts::enums::{ReturnCondition, ReturnDisposition, ReturnReason, ReturnStatus};
use std::collections::HashMap;

use super::repository;
use super::repository::ItemOccurrenceRow;

const TOP_PRODUCTS_LIMIT: usize = 5;

/// Live count of open and finished returns per lifecycle status.
pub async fn get_status_counts() -> Result<ReturnStatusCounts> {
    let rows = repository::status_counts().await?;

    let mut counts = ReturnStatusCounts::default();
    for row in rows {
        match ReturnStatus::from_code(&row.status) {
            Some(status) => counts.add(status, row.cnt),
            None => tracing::warn!("Skipping unknown return status in counts: {}", row.status),
        }
    }
    Ok(counts)
}

/// Full returns picture for a reporting period.
///
/// Omitted bounds default to the last 30 days ending now.
pub async fn get_metrics(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Result<ReturnMetrics> {
    let end = end.unwrap_or_else(Utc::now);
    let start = start.unwrap_or_else(|| end - Duration::days(30));

    let totals_row = repository::totals_for_period(start, end).await?;
    let order_count = repository::order_count_for_period(start, end).await?;

    let totals = MetricsTotals {
        return_count: totals_row.return_count,
        return_rate: percentage(totals_row.return_count, order_count),
        total_refund_amount: totals_row.total_refund_amount,
        average_refund_amount: totals_row.average_refund_amount,
        average_processing_days: totals_row.average_processing_days,
    };

    // Reason breakdown comes from the order headers, condition and
    // disposition from the recorded inspection verdicts.
    let reason_rows = repository::reason_counts(start, end).await?;
    let reason_total: i64 = reason_rows.iter().map(|r| r.cnt).sum();
    let mut by_reason = Vec::new();
    for row in reason_rows {
        if let Some(code) = row.code {
            match ReturnReason::from_code(&code) {
                Some(reason) => by_reason.push(ReasonSlice {
                    reason,
                    count: row.cnt,
                    percentage: percentage(row.cnt, reason_total),
                }),
                None => tracing::warn!("Skipping unknown return reason in metrics: {}", code),
            }
        }
    }

    let condition_rows = repository::condition_counts(start, end).await?;
    let condition_total: i64 = condition_rows.iter().map(|r| r.cnt).sum();
    let mut by_condition = Vec::new();
    for row in condition_rows {
        if let Some(code) = row.code {
            match ReturnCondition::from_code(&code) {
                Some(condition) => by_condition.push(ConditionSlice {
                    condition,
                    count: row.cnt,
                    percentage: percentage(row.cnt, condition_total),
                }),
                None => tracing::warn!("Skipping unknown condition in metrics: {}", code),
            }
        }
    }

    let disposition_rows = repository::disposition_counts(start, end).await?;
    let disposition_total: i64 = disposition_rows.iter().map(|r| r.cnt).sum();
    let mut by_disposition = Vec::new();
    for row in disposition_rows {
        if let Some(code) = row.code {
            match ReturnDisposition::from_code(&code) {
                Some(disposition) => by_disposition.push(DispositionSlice {
                    disposition,
                    count: row.cnt,
                    percentage: percentage(row.cnt, disposition_total),
                }),
                None => tracing::warn!("Skipping unknown disposition in metrics: {}", code),
            }
        }
    }

    let occurrences = repository::item_occurrences(start, end).await?;
    let top_returned_products = rank_products(occurrences);

    let restocking_row = repository::restocking_counts(start, end).await?;
    let restocking_metrics = RestockingMetrics {
        total_received: restocking_row.total_received,
        total_restocked: restocking_row.total_restocked,
        total_disposed: restocking_row.total_disposed,
        restock_rate: percentage(restocking_row.total_restocked, restocking_row.total_received),
    };

    Ok(ReturnMetrics {
        period: MetricsPeriod { start, end },
        totals,
        by_reason,
        by_condition,
        by_disposition,
        top_returned_products,
        restocking_metrics,
    })
}

fn percentage(count: i64, total: i64) -> f64 {
    if total > 0 {
        count as f64 / total as f64 * 100.0
    } else {
        0.0
    }
}

/// Fold per-item occurrences into the most-returned-products ranking.
///
/// `return_count` counts return orders naming the SKU (an order carries a
/// SKU at most once); `primary_reason` is the most frequent order-level
/// reason among those orders.
fn rank_products(rows: Vec<ItemOccurrenceRow>) -> Vec<TopReturnedProduct> {
    struct ProductAgg {
        product_name: String,
        return_count: i64,
        total_quantity: i64,
        reasons: HashMap<ReturnReason, i64>,
    }

    let mut by_sku: HashMap<String, ProductAgg> = HashMap::new();
    for row in rows {
        let reason = row
            .reason
            .as_deref()
            .and_then(ReturnReason::from_code)
            .unwrap_or(ReturnReason::Other);

        let product_name = row.product_name;
        let agg = by_sku.entry(row.sku).or_insert_with(|| ProductAgg {
            product_name,
            return_count: 0,
            total_quantity: 0,
            reasons: HashMap::new(),
        });
        agg.return_count += 1;
        agg.total_quantity += row.quantity;
        *agg.reasons.entry(reason).or_insert(0) += 1;
    }

    let mut products: Vec<TopReturnedProduct> = by_sku
        .into_iter()
        .map(|(sku, agg)| {
            let primary_reason = agg
                .reasons
                .into_iter()
                .max_by_key(|(_, n)| *n)
                .map(|(reason, _)| reason)
                .unwrap_or(ReturnReason::Other);
            TopReturnedProduct {
                sku,
                product_name: agg.product_name,
                return_count: agg.return_count,
                total_quantity: agg.total_quantity,
                primary_reason,
            }
        })
        .collect();

    products.sort_by(|a, b| {
        b.return_count
            .cmp(&a.return_count)
            .then(b.total_quantity.cmp(&a.total_quantity))
            .then(a.sku.cmp(&b.sku))
    });
    products.truncate(TOP_PRODUCTS_LIMIT);
    products
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(sku: &str, name: &str, reason: &str, quantity: i64) -> ItemOccurrenceRow {
        ItemOccurrenceRow {
            sku: sku.to_string(),
            product_name: name.to_string(),
            reason: Some(reason.to_string()),
            quantity,
        }
    }

    #[test]
    fn test_percentage() {
        assert_eq!(percentage(1, 4), 25.0);
        assert_eq!(percentage(0, 4), 0.0);
        assert_eq!(percentage(3, 0), 0.0);
    }

    #[test]
    fn test_rank_products_orders_by_return_count_then_quantity() {
        let rows = vec![
            row("SKU-A", "Desk Lamp", "DEFECTIVE", 1),
            row("SKU-A", "Desk Lamp", "DEFECTIVE", 2),
            row("SKU-B", "Mug", "NOT_AS_DESCRIBED", 10),
            row("SKU-C", "Chair", "DEFECTIVE", 1),
            row("SKU-C", "Chair", "NO_LONGER_NEEDED", 1),
        ];

        let ranked = rank_products(rows);
        assert_eq!(ranked.len(), 3);
        assert_eq!(ranked[0].sku, "SKU-A");
        assert_eq!(ranked[0].return_count, 2);
        assert_eq!(ranked[0].total_quantity, 3);
        assert_eq!(ranked[0].primary_reason, ReturnReason::Defective);
        assert_eq!(ranked[1].sku, "SKU-C");
        assert_eq!(ranked[2].sku, "SKU-B");
        assert_eq!(ranked[2].total_quantity, 10);
    }

    #[test]
    fn test_rank_products_keeps_top_five() {
        let mut rows = Vec::new();
        for i in 0..8 {
            for _ in 0..=i {
                rows.push(row(&format!("SKU-{i}"), "Widget", "OTHER", 1));
            }
        }

        let ranked = rank_products(rows);
        assert_eq!(ranked.len(), 5);
        assert_eq!(ranked[0].sku, "SKU-7");
        assert_eq!(ranked[4].sku, "SKU-3");
    }

    #[test]
    fn test_rank_products_falls_back_to_other_for_unknown_reason() {
        let rows = vec![ItemOccurrenceRow {
            sku: "SKU-X".to_string(),
            product_name: "Widget".to_string(),
            reason: None,
            quantity: 1,
        }];

        let ranked = rank_products(rows);
        assert_eq!(ranked[0].primary_reason, ReturnReason::Other);
    }
}
