use serde::{Deserialize, Serialize};

/// Per-line progress inside a return order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReturnItemStatus {
    Pending,
    Inspected,
}

impl ReturnItemStatus {
    /// Wire code of the status
    pub fn code(&self) -> &'static str {
        match self {
            ReturnItemStatus::Pending => "PENDING",
            ReturnItemStatus::Inspected => "INSPECTED",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            ReturnItemStatus::Pending => "Awaiting inspection",
            ReturnItemStatus::Inspected => "Inspected",
        }
    }

    /// Parse from a wire code
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "PENDING" => Some(ReturnItemStatus::Pending),
            "INSPECTED" => Some(ReturnItemStatus::Inspected),
            _ => None,
        }
    }
}

impl ToString for ReturnItemStatus {
    fn to_string(&self) -> String {
        self.code().to_string()
    }
}
