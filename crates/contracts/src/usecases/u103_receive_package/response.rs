use crate::enums::ReturnStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Receipt confirmation for the warehouse screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceivedPackage {
    pub id: String,
    #[serde(rename = "rmaNumber")]
    pub rma_number: String,
    pub status: ReturnStatus,
    #[serde(rename = "receivedAt")]
    pub received_at: DateTime<Utc>,
    #[serde(rename = "receivedBy")]
    pub received_by: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceivePackageResponse {
    pub success: bool,
    #[serde(rename = "returnOrder")]
    pub return_order: Option<ReceivedPackage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ReceivePackageResponse {
    pub fn received(return_order: ReceivedPackage) -> Self {
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
