use serde::{Deserialize, Serialize};

/// Lifecycle status of a return order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReturnStatus {
    Pending,
    Approved,
    Rejected,
    InTransit,
    Received,
    Inspecting,
    InspectionComplete,
    Restocking,
    RefundPending,
    Refunded,
    PartiallyRefunded,
    Closed,
    Cancelled,
}

impl ReturnStatus {
    /// Wire code of the status
    pub fn code(&self) -> &'static str {
        match self {
            ReturnStatus::Pending => "PENDING",
            ReturnStatus::Approved => "APPROVED",
            ReturnStatus::Rejected => "REJECTED",
            ReturnStatus::InTransit => "IN_TRANSIT",
            ReturnStatus::Received => "RECEIVED",
            ReturnStatus::Inspecting => "INSPECTING",
            ReturnStatus::InspectionComplete => "INSPECTION_COMPLETE",
            ReturnStatus::Restocking => "RESTOCKING",
            ReturnStatus::RefundPending => "REFUND_PENDING",
            ReturnStatus::Refunded => "REFUNDED",
            ReturnStatus::PartiallyRefunded => "PARTIALLY_REFUNDED",
            ReturnStatus::Closed => "CLOSED",
            ReturnStatus::Cancelled => "CANCELLED",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            ReturnStatus::Pending => "Pending approval",
            ReturnStatus::Approved => "Approved",
            ReturnStatus::Rejected => "Rejected",
            ReturnStatus::InTransit => "In transit",
            ReturnStatus::Received => "Received",
            ReturnStatus::Inspecting => "Inspecting",
            ReturnStatus::InspectionComplete => "Inspection complete",
            ReturnStatus::Restocking => "Restocking",
            ReturnStatus::RefundPending => "Refund pending",
            ReturnStatus::Refunded => "Refunded",
            ReturnStatus::PartiallyRefunded => "Partially refunded",
            ReturnStatus::Closed => "Closed",
            ReturnStatus::Cancelled => "Cancelled",
        }
    }

    /// All statuses in lifecycle order
    pub fn all() -> Vec<ReturnStatus> {
        vec![
            ReturnStatus::Pending,
            ReturnStatus::Approved,
            ReturnStatus::Rejected,
            ReturnStatus::InTransit,
            ReturnStatus::Received,
            ReturnStatus::Inspecting,
            ReturnStatus::InspectionComplete,
            ReturnStatus::Restocking,
            ReturnStatus::RefundPending,
            ReturnStatus::Refunded,
            ReturnStatus::PartiallyRefunded,
            ReturnStatus::Closed,
            ReturnStatus::Cancelled,
        ]
    }

    /// Parse from a wire code
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "PENDING" => Some(ReturnStatus::Pending),
            "APPROVED" => Some(ReturnStatus::Approved),
            "REJECTED" => Some(ReturnStatus::Rejected),
            "IN_TRANSIT" => Some(ReturnStatus::InTransit),
            "RECEIVED" => Some(ReturnStatus::Received),
            "INSPECTING" => Some(ReturnStatus::Inspecting),
            "INSPECTION_COMPLETE" => Some(ReturnStatus::InspectionComplete),
            "RESTOCKING" => Some(ReturnStatus::Restocking),
            "REFUND_PENDING" => Some(ReturnStatus::RefundPending),
            "REFUNDED" => Some(ReturnStatus::Refunded),
            "PARTIALLY_REFUNDED" => Some(ReturnStatus::PartiallyRefunded),
            "CLOSED" => Some(ReturnStatus::Closed),
            "CANCELLED" => Some(ReturnStatus::Cancelled),
            _ => None,
        }
    }
}

impl ToString for ReturnStatus {
    fn to_string(&self) -> String {
        self.code().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for status in ReturnStatus::all() {
            assert_eq!(ReturnStatus::from_code(status.code()), Some(status));
        }
        assert_eq!(ReturnStatus::from_code("SHIPPED"), None);
    }

    #[test]
    fn serde_uses_wire_codes() {
        let json = serde_json::to_string(&ReturnStatus::InspectionComplete).unwrap();
        assert_eq!(json, "\"INSPECTION_COMPLETE\"");
        let back: ReturnStatus = serde_json::from_str("\"PARTIALLY_REFUNDED\"").unwrap();
        assert_eq!(back, ReturnStatus::PartiallyRefunded);
    }
}
