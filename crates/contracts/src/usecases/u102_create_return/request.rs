use crate::enums::{RefundMethod, ReturnReason};
use serde::{Deserialize, Serialize};

/// One line the customer wants to send back
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReturnItem {
    #[serde(rename = "productVariantId")]
    pub product_variant_id: String,
    #[serde(rename = "quantityRequested")]
    pub quantity_requested: i32,
}

/// Customer submits a return request for items of a looked-up order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReturnRequest {
    /// The order the return draws from (a001_sales_order.id)
    #[serde(rename = "orderId")]
    pub order_id: String,

    /// Re-verified against the order on the server
    #[serde(rename = "customerEmail")]
    pub customer_email: String,

    pub reason: ReturnReason,

    #[serde(rename = "reasonDetails")]
    #[serde(default)]
    pub reason_details: Option<String>,

    #[serde(rename = "refundMethod")]
    pub refund_method: RefundMethod,

    pub items: Vec<CreateReturnItem>,
}
