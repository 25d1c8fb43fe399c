use crate::enums::ReturnStatus;
use serde::{Deserialize, Serialize};

/// The created return, as echoed to the customer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedReturn {
    pub id: String,
    #[serde(rename = "rmaNumber")]
    pub rma_number: String,
    pub status: ReturnStatus,
    #[serde(rename = "approvalRequired")]
    pub approval_required: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReturnResponse {
    pub success: bool,
    #[serde(rename = "returnOrder")]
    pub return_order: Option<CreatedReturn>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl CreateReturnResponse {
    pub fn created(return_order: CreatedReturn) -> Self {
        Self {
            success: true,
            return_order: Some(return_order),
            error: None,
            code: None,
        }
    }

    pub fn failed(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            return_order: None,
            error: Some(error.into()),
            code: Some(code.into()),
        }
    }
}
