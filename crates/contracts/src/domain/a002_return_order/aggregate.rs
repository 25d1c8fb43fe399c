use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::enums::{RefundMethod, RefundStatus, ReturnItemStatus, ReturnReason, ReturnStatus};
use crate::policy::RefundCalculation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// ID type for return orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReturnOrderId(pub Uuid);

impl ReturnOrderId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for ReturnOrderId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }
    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(ReturnOrderId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Header fields of a return order, fixed at creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnOrderHeader {
    /// Originating sales order (a001_sales_order.id)
    #[serde(rename = "orderId")]
    pub order_id: String,
    /// Order number captured at creation for display
    #[serde(rename = "orderNumber")]
    pub order_number: String,
    /// Customer e-mail captured at creation for verification
    #[serde(rename = "customerEmail")]
    pub customer_email: String,
    /// Why the customer is returning
    pub reason: ReturnReason,
    /// Free-form detail for the reason
    #[serde(rename = "reasonDetails")]
    #[serde(default)]
    pub reason_details: Option<String>,
    /// How the customer wants to be compensated
    #[serde(rename = "refundMethod")]
    pub refund_method: RefundMethod,
    /// Whether the request needed manual approval
    #[serde(rename = "approvalRequired")]
    pub approval_required: bool,
    /// Full-price estimate at creation time (before inspection)
    #[serde(rename = "estimatedRefund")]
    pub estimated_refund: f64,
}

/// One line of a return order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnItem {
    /// Line ID (stable, referenced by inspections)
    pub id: String,
    /// Sales order line this return line draws from
    #[serde(rename = "orderLineId")]
    pub order_line_id: String,
    /// Product variant being returned
    #[serde(rename = "productVariantId")]
    pub product_variant_id: String,
    /// Merchant SKU
    pub sku: String,
    /// Product display name
    pub name: String,
    /// Units the customer asked to return
    #[serde(rename = "quantityRequested")]
    pub quantity_requested: i32,
    /// Price per unit captured from the order line
    #[serde(rename = "unitPrice")]
    pub unit_price: f64,
    /// Line progress
    pub status: ReturnItemStatus,
}

/// Status and audit timestamps of a return order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnOrderState {
    /// Lifecycle status
    pub status: ReturnStatus,
    /// Carrier tracking number, captured at receipt if the customer supplied one
    #[serde(rename = "trackingNumber")]
    #[serde(default)]
    pub tracking_number: Option<String>,
    #[serde(rename = "approvedAt")]
    #[serde(default)]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(rename = "approvedBy")]
    #[serde(default)]
    pub approved_by: Option<String>,
    #[serde(rename = "receivedAt")]
    #[serde(default)]
    pub received_at: Option<DateTime<Utc>>,
    #[serde(rename = "receivedBy")]
    #[serde(default)]
    pub received_by: Option<String>,
    #[serde(rename = "inspectedAt")]
    #[serde(default)]
    pub inspected_at: Option<DateTime<Utc>>,
    #[serde(rename = "inspectedBy")]
    #[serde(default)]
    pub inspected_by: Option<String>,
    /// Progress of the refund itself
    #[serde(rename = "refundStatus")]
    #[serde(default)]
    pub refund_status: Option<RefundStatus>,
    /// Amount actually refunded
    #[serde(rename = "refundedAmount")]
    #[serde(default)]
    pub refunded_amount: Option<f64>,
    #[serde(rename = "refundedAt")]
    #[serde(default)]
    pub refunded_at: Option<DateTime<Utc>>,
    /// Full breakdown of the issued refund
    #[serde(rename = "refundBreakdown")]
    #[serde(default)]
    pub refund_breakdown: Option<RefundCalculation>,
}

impl ReturnOrderState {
    /// Initial state for a freshly created return
    pub fn new(status: ReturnStatus) -> Self {
        Self {
            status,
            tracking_number: None,
            approved_at: None,
            approved_by: None,
            received_at: None,
            received_by: None,
            inspected_at: None,
            inspected_by: None,
            refund_status: None,
            refunded_amount: None,
            refunded_at: None,
            refund_breakdown: None,
        }
    }
}

/// Return order (aggregate). The business code is the RMA number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnOrder {
    #[serde(flatten)]
    pub base: BaseAggregate<ReturnOrderId>,

    /// Header, fixed at creation
    pub header: ReturnOrderHeader,

    /// Lines being returned
    pub items: Vec<ReturnItem>,

    /// Status and audit trail
    pub state: ReturnOrderState,
}

impl ReturnOrder {
    pub fn new_for_insert(
        rma_number: String,
        header: ReturnOrderHeader,
        items: Vec<ReturnItem>,
        initial_status: ReturnStatus,
    ) -> Self {
        let description = format!("Return for order {}", header.order_number);
        let base = BaseAggregate::new(ReturnOrderId::new_v4(), rma_number, description);
        Self {
            base,
            header,
            items,
            state: ReturnOrderState::new(initial_status),
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    /// RMA number, the business code of the aggregate
    pub fn rma_number(&self) -> &str {
        &self.base.code
    }

    pub fn touch_updated(&mut self) {
        self.base.touch();
    }

    /// Total units requested across all lines
    pub fn total_quantity_requested(&self) -> i32 {
        self.items.iter().map(|i| i.quantity_requested).sum()
    }

    /// Lines still waiting for inspection
    pub fn pending_items(&self) -> Vec<&ReturnItem> {
        self.items
            .iter()
            .filter(|i| i.status == ReturnItemStatus::Pending)
            .collect()
    }

    /// True when every line has been inspected
    pub fn all_items_inspected(&self) -> bool {
        self.items
            .iter()
            .all(|i| i.status == ReturnItemStatus::Inspected)
    }

    pub fn find_item(&self, item_id: &str) -> Option<&ReturnItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    pub fn find_item_mut(&mut self, item_id: &str) -> Option<&mut ReturnItem> {
        self.items.iter_mut().find(|i| i.id == item_id)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.base.code.trim().is_empty() {
            return Err("RMA number cannot be empty".into());
        }
        if self.header.order_id.trim().is_empty() {
            return Err("Originating order is required".into());
        }
        if self.header.customer_email.trim().is_empty() {
            return Err("Customer e-mail is required".into());
        }
        if self.items.is_empty() {
            return Err("A return needs at least one item".into());
        }
        for item in &self.items {
            if item.quantity_requested <= 0 {
                return Err(format!(
                    "Item {} has non-positive requested quantity",
                    item.sku
                ));
            }
            if item.unit_price < 0.0 {
                return Err(format!("Item {} has negative unit price", item.sku));
            }
        }
        if self.header.estimated_refund < 0.0 {
            return Err("Estimated refund cannot be negative".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.touch_updated();
    }
}

/// Flat row for the returns list screen, assembled by SQL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnOrderListItem {
    pub id: String,
    #[serde(rename = "rmaNumber")]
    pub rma_number: String,
    #[serde(rename = "orderNumber")]
    pub order_number: String,
    #[serde(rename = "customerEmail")]
    pub customer_email: String,
    pub status: ReturnStatus,
    pub reason: ReturnReason,
    #[serde(rename = "itemCount")]
    pub item_count: i32,
    #[serde(rename = "totalQuantity")]
    pub total_quantity: i32,
    #[serde(rename = "estimatedRefund")]
    pub estimated_refund: f64,
    #[serde(rename = "refundedAmount")]
    pub refunded_amount: Option<f64>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl AggregateRoot for ReturnOrder {
    type Id = ReturnOrderId;

    fn id(&self) -> Self::Id {
        self.base.id
    }

    fn code(&self) -> &str {
        &self.base.code
    }

    fn description(&self) -> &str {
        &self.base.description
    }

    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }

    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "return_order"
    }

    fn element_name() -> &'static str {
        "Return order"
    }

    fn list_name() -> &'static str {
        "Return orders"
    }
}
