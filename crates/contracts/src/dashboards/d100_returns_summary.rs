use crate::enums::{ReturnCondition, ReturnDisposition, ReturnReason, ReturnStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Count of return orders per lifecycle status
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReturnStatusCounts {
    #[serde(rename = "PENDING")]
    pub pending: i64,
    #[serde(rename = "APPROVED")]
    pub approved: i64,
    #[serde(rename = "REJECTED")]
    pub rejected: i64,
    #[serde(rename = "IN_TRANSIT")]
    pub in_transit: i64,
    #[serde(rename = "RECEIVED")]
    pub received: i64,
    #[serde(rename = "INSPECTING")]
    pub inspecting: i64,
    #[serde(rename = "INSPECTION_COMPLETE")]
    pub inspection_complete: i64,
    #[serde(rename = "RESTOCKING")]
    pub restocking: i64,
    #[serde(rename = "REFUND_PENDING")]
    pub refund_pending: i64,
    #[serde(rename = "REFUNDED")]
    pub refunded: i64,
    #[serde(rename = "PARTIALLY_REFUNDED")]
    pub partially_refunded: i64,
    #[serde(rename = "CLOSED")]
    pub closed: i64,
    #[serde(rename = "CANCELLED")]
    pub cancelled: i64,
}

impl ReturnStatusCounts {
    pub fn add(&mut self, status: ReturnStatus, count: i64) {
        match status {
            ReturnStatus::Pending => self.pending += count,
            ReturnStatus::Approved => self.approved += count,
            ReturnStatus::Rejected => self.rejected += count,
            ReturnStatus::InTransit => self.in_transit += count,
            ReturnStatus::Received => self.received += count,
            ReturnStatus::Inspecting => self.inspecting += count,
            ReturnStatus::InspectionComplete => self.inspection_complete += count,
            ReturnStatus::Restocking => self.restocking += count,
            ReturnStatus::RefundPending => self.refund_pending += count,
            ReturnStatus::Refunded => self.refunded += count,
            ReturnStatus::PartiallyRefunded => self.partially_refunded += count,
            ReturnStatus::Closed => self.closed += count,
            ReturnStatus::Cancelled => self.cancelled += count,
        }
    }

    pub fn total(&self) -> i64 {
        self.pending
            + self.approved
            + self.rejected
            + self.in_transit
            + self.received
            + self.inspecting
            + self.inspection_complete
            + self.restocking
            + self.refund_pending
            + self.refunded
            + self.partially_refunded
            + self.closed
            + self.cancelled
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsPeriod {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricsTotals {
    #[serde(rename = "returnCount")]
    pub return_count: i64,
    /// Returns as a percentage of orders in the period
    #[serde(rename = "returnRate")]
    pub return_rate: f64,
    #[serde(rename = "totalRefundAmount")]
    pub total_refund_amount: f64,
    #[serde(rename = "averageRefundAmount")]
    pub average_refund_amount: f64,
    /// Mean days from creation to refund for refunded returns
    #[serde(rename = "averageProcessingDays")]
    pub average_processing_days: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReasonSlice {
    pub reason: ReturnReason,
    pub count: i64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionSlice {
    pub condition: ReturnCondition,
    pub count: i64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispositionSlice {
    pub disposition: ReturnDisposition,
    pub count: i64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopReturnedProduct {
    pub sku: String,
    #[serde(rename = "productName")]
    pub product_name: String,
    #[serde(rename = "returnCount")]
    pub return_count: i64,
    #[serde(rename = "totalQuantity")]
    pub total_quantity: i64,
    #[serde(rename = "primaryReason")]
    pub primary_reason: ReturnReason,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestockingMetrics {
    #[serde(rename = "totalReceived")]
    pub total_received: i64,
    #[serde(rename = "totalRestocked")]
    pub total_restocked: i64,
    #[serde(rename = "totalDisposed")]
    pub total_disposed: i64,
    /// Restocked units as a percentage of received units
    #[serde(rename = "restockRate")]
    pub restock_rate: f64,
}

/// Aggregated returns picture for a reporting period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnMetrics {
    pub period: MetricsPeriod,
    pub totals: MetricsTotals,
    #[serde(rename = "byReason")]
    pub by_reason: Vec<ReasonSlice>,
    #[serde(rename = "byCondition")]
    pub by_condition: Vec<ConditionSlice>,
    #[serde(rename = "byDisposition")]
    pub by_disposition: Vec<DispositionSlice>,
    #[serde(rename = "topReturnedProducts")]
    pub top_returned_products: Vec<TopReturnedProduct>,
    #[serde(rename = "restockingMetrics")]
    pub restocking_metrics: RestockingMetrics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_counts_cover_every_status() {
        let mut counts = ReturnStatusCounts::default();
        for (i, status) in ReturnStatus::all().into_iter().enumerate() {
            counts.add(status, (i + 1) as i64);
        }
        // 1 + 2 + ... + 13
        assert_eq!(counts.total(), 91);
        assert_eq!(counts.pending, 1);
        assert_eq!(counts.cancelled, 13);
    }

    #[test]
    fn status_counts_serialize_with_wire_codes() {
        let mut counts = ReturnStatusCounts::default();
        counts.add(ReturnStatus::RefundPending, 2);
        let json = serde_json::to_value(&counts).unwrap();
        assert_eq!(json["REFUND_PENDING"], 2);
        assert_eq!(json["PENDING"], 0);
    }
}
