use crate::enums::{RefundStatus, ReturnStatus};
use crate::policy::RefundCalculation;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessRefundResponse {
    pub success: bool,
    /// Full breakdown of the issued refund
    pub calculation: Option<RefundCalculation>,
    /// REFUNDED or PARTIALLY_REFUNDED after issuing
    pub status: Option<ReturnStatus>,
    #[serde(rename = "refundStatus")]
    pub refund_status: Option<RefundStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ProcessRefundResponse {
    pub fn refunded(
        calculation: RefundCalculation,
        status: ReturnStatus,
        refund_status: RefundStatus,
    ) -> Self {
        Self {
            success: true,
            calculation: Some(calculation),
            status: Some(status),
            refund_status: Some(refund_status),
            error: None,
            code: None,
        }
    }

    pub fn failed(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            calculation: None,
            status: None,
            refund_status: None,
            error: Some(error.into()),
            code: Some(code.into()),
        }
    }
}
