use crate::domain::a003_inspection::Inspection;
use crate::enums::ReturnStatus;
use crate::policy::InspectionSummary;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectItemResponse {
    pub success: bool,
    /// The stored (or replaced) inspection record
    pub inspection: Option<Inspection>,
    /// Rolling summary over all inspected lines of the return
    pub summary: Option<InspectionSummary>,
    /// Return order status after this inspection, which may have
    /// advanced to INSPECTING or INSPECTION_COMPLETE
    #[serde(rename = "orderStatus")]
    pub order_status: Option<ReturnStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl InspectItemResponse {
    pub fn inspected(
        inspection: Inspection,
        summary: InspectionSummary,
        order_status: ReturnStatus,
    ) -> Self {
        Self {
            success: true,
            inspection: Some(inspection),
            summary: Some(summary),
            order_status: Some(order_status),
            error: None,
            code: None,
        }
    }

    pub fn failed(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            inspection: None,
            summary: None,
            order_status: None,
            error: Some(error.into()),
            code: Some(code.into()),
        }
    }
}
