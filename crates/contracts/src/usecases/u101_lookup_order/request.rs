use serde::{Deserialize, Serialize};

/// Customer looks up their order to start a return
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupOrderRequest {
    /// Customer-facing order number, e.g. "ORD-2025-1042"
    #[serde(rename = "orderNumber")]
    pub order_number: String,

    /// E-mail on the order; matched case-insensitively
    #[serde(rename = "customerEmail")]
    pub customer_email: String,
}
