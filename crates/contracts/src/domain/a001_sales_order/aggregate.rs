use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::policy::quantity_available;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// ID type for sales orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SalesOrderId(pub Uuid);

impl SalesOrderId {
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

impl AggregateId for SalesOrderId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }
    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(SalesOrderId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// One sellable line of a sales order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesOrderLine {
    /// Line ID (stable, referenced by return items)
    pub id: String,

    /// Product variant the line sells
    #[serde(rename = "productVariantId")]
    pub product_variant_id: String,

    /// Merchant SKU
    pub sku: String,

    /// Product display name
    pub name: String,

    /// Units sold
    pub quantity: i32,

    /// Units already committed to returns
    #[serde(rename = "quantityReturned")]
    pub quantity_returned: i32,

    /// Price per unit at sale time
    #[serde(rename = "unitPrice")]
    pub unit_price: f64,

    /// Product image for the selection screen
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
}

impl SalesOrderLine {
    /// Units still open for a new return request
    pub fn quantity_available(&self) -> i32 {
        quantity_available(self.quantity, self.quantity_returned)
    }
}

/// Sales order mirrored from order management (aggregate)
///
/// Read-mostly here: the returns flow only ever touches
/// `quantity_returned` on the lines, and that under a guarded update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesOrder {
    #[serde(flatten)]
    pub base: BaseAggregate<SalesOrderId>,

    /// Customer-facing order number (e.g. "ORD-2025-1042")
    #[serde(rename = "orderNumber")]
    pub order_number: String,

    /// Customer name
    #[serde(rename = "customerName")]
    pub customer_name: String,

    /// Customer e-mail, matched case-insensitively at lookup
    #[serde(rename = "customerEmail")]
    pub customer_email: String,

    /// Fulfilment status as reported by order management
    #[serde(rename = "orderStatus")]
    pub order_status: String,

    /// When the order left the warehouse; None until shipped
    #[serde(rename = "shippedAt")]
    pub shipped_at: Option<DateTime<Utc>>,

    /// Order lines
    pub lines: Vec<SalesOrderLine>,
}

impl SalesOrder {
    pub fn new_for_insert(
        order_number: String,
        customer_name: String,
        customer_email: String,
        order_status: String,
        shipped_at: Option<DateTime<Utc>>,
        lines: Vec<SalesOrderLine>,
    ) -> Self {
        let base = BaseAggregate::new(
            SalesOrderId::new_v4(),
            order_number.clone(),
            customer_name.clone(),
        );
        Self {
            base,
            order_number,
            customer_name,
            customer_email,
            order_status,
            shipped_at,
            lines,
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn touch_updated(&mut self) {
        self.base.touch();
    }

    /// Line selling a given product variant
    pub fn find_line_by_variant(&self, product_variant_id: &str) -> Option<&SalesOrderLine> {
        self.lines
            .iter()
            .find(|l| l.product_variant_id == product_variant_id)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.order_number.trim().is_empty() {
            return Err("Order number cannot be empty".into());
        }
        if self.customer_email.trim().is_empty() {
            return Err("Customer e-mail cannot be empty".into());
        }
        for line in &self.lines {
            if line.quantity <= 0 {
                return Err(format!("Line {} has non-positive quantity", line.sku));
            }
            if line.quantity_returned < 0 || line.quantity_returned > line.quantity {
                return Err(format!(
                    "Line {} has returned quantity outside [0, quantity]",
                    line.sku
                ));
            }
            if line.unit_price < 0.0 {
                return Err(format!("Line {} has negative unit price", line.sku));
            }
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.touch_updated();
    }
}

impl AggregateRoot for SalesOrder {
    type Id = SalesOrderId;
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
        "a001"
    }
    fn collection_name() -> &'static str {
        "sales_order"
    }
    fn element_name() -> &'static str {
        "Sales order"
    }
    fn list_name() -> &'static str {
        "Sales orders"
    }
}
