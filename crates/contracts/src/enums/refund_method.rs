use serde::{Deserialize, Serialize};

/// How the customer is compensated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RefundMethod {
    OriginalPayment,
    StoreCredit,
    Replacement,
    NoRefund,
}

impl RefundMethod {
    /// Wire code of the method
    pub fn code(&self) -> &'static str {
        match self {
            RefundMethod::OriginalPayment => "ORIGINAL_PAYMENT",
            RefundMethod::StoreCredit => "STORE_CREDIT",
            RefundMethod::Replacement => "REPLACEMENT",
            RefundMethod::NoRefund => "NO_REFUND",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            RefundMethod::OriginalPayment => "Original payment method",
            RefundMethod::StoreCredit => "Store credit",
            RefundMethod::Replacement => "Replacement item",
            RefundMethod::NoRefund => "No refund",
        }
    }

    /// All methods
    pub fn all() -> Vec<RefundMethod> {
        vec![
            RefundMethod::OriginalPayment,
            RefundMethod::StoreCredit,
            RefundMethod::Replacement,
            RefundMethod::NoRefund,
        ]
    }

    /// Parse from a wire code
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ORIGINAL_PAYMENT" => Some(RefundMethod::OriginalPayment),
            "STORE_CREDIT" => Some(RefundMethod::StoreCredit),
            "REPLACEMENT" => Some(RefundMethod::Replacement),
            "NO_REFUND" => Some(RefundMethod::NoRefund),
            _ => None,
        }
    }
}

impl ToString for RefundMethod {
    fn to_string(&self) -> String {
        self.code().to_string()
    }
}
