use crate::policy::ReturnEligibility;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order found by lookup, with per-line return availability
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookedUpOrder {
    pub id: String,
    #[serde(rename = "orderNumber")]
    pub order_number: String,
    #[serde(rename = "customerName")]
    pub customer_name: String,
    #[serde(rename = "customerEmail")]
    pub customer_email: String,
    #[serde(rename = "shippedAt")]
    pub shipped_at: Option<DateTime<Utc>>,
    pub items: Vec<LookedUpOrderItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookedUpOrderItem {
    pub id: String,
    #[serde(rename = "productVariantId")]
    pub product_variant_id: String,
    pub sku: String,
    pub name: String,
    pub quantity: i32,
    /// Units already committed to earlier returns
    #[serde(rename = "quantityReturned")]
    pub quantity_returned: i32,
    /// Units still open for this request
    #[serde(rename = "quantityAvailable")]
    pub quantity_available: i32,
    #[serde(rename = "unitPrice")]
    pub unit_price: f64,
    #[serde(rename = "imageUrl")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupOrderResponse {
    pub success: bool,
    pub order: Option<LookedUpOrder>,
    pub eligibility: ReturnEligibility,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl LookupOrderResponse {
    pub fn found(order: LookedUpOrder, eligibility: ReturnEligibility) -> Self {
        Self {
            success: true,
            order: Some(order),
            eligibility,
            error: None,
            code: None,
        }
    }

    pub fn failed(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            order: None,
            eligibility: ReturnEligibility {
                is_eligible: false,
                reason: None,
                days_remaining: None,
            },
            error: Some(error.into()),
            code: Some(code.into()),
        }
    }
}
