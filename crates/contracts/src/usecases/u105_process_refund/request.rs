use crate::policy::RefundAdjustment;
use serde::{Deserialize, Serialize};

/// Staff finalizes the refund for a fully inspected return
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProcessRefundRequest {
    /// Manual corrections, positive or negative
    #[serde(default)]
    pub adjustments: Vec<RefundAdjustment>,

    /// Shipping cost refunded on top of the item subtotal
    #[serde(rename = "shippingRefund")]
    #[serde(default)]
    pub shipping_refund: Option<f64>,

    #[serde(default)]
    pub notes: Option<String>,
}
