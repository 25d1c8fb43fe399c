use serde::{Deserialize, Serialize};

/// Progress of the refund itself, independent of the return order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RefundStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Partial,
    Cancelled,
}

impl RefundStatus {
    /// Wire code of the status
    pub fn code(&self) -> &'static str {
        match self {
            RefundStatus::Pending => "PENDING",
            RefundStatus::Processing => "PROCESSING",
            RefundStatus::Completed => "COMPLETED",
            RefundStatus::Failed => "FAILED",
            RefundStatus::Partial => "PARTIAL",
            RefundStatus::Cancelled => "CANCELLED",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            RefundStatus::Pending => "Pending",
            RefundStatus::Processing => "Processing",
            RefundStatus::Completed => "Completed",
            RefundStatus::Failed => "Failed",
            RefundStatus::Partial => "Partial",
            RefundStatus::Cancelled => "Cancelled",
        }
    }

    /// All statuses
    pub fn all() -> Vec<RefundStatus> {
        vec![
            RefundStatus::Pending,
            RefundStatus::Processing,
            RefundStatus::Completed,
            RefundStatus::Failed,
            RefundStatus::Partial,
            RefundStatus::Cancelled,
        ]
    }

    /// Parse from a wire code
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "PENDING" => Some(RefundStatus::Pending),
            "PROCESSING" => Some(RefundStatus::Processing),
            "COMPLETED" => Some(RefundStatus::Completed),
            "FAILED" => Some(RefundStatus::Failed),
            "PARTIAL" => Some(RefundStatus::Partial),
            "CANCELLED" => Some(RefundStatus::Cancelled),
            _ => None,
        }
    }
}

impl ToString for RefundStatus {
    fn to_string(&self) -> String {
        self.code().to_string()
    }
}
