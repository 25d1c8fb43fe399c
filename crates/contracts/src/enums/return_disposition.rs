use serde::{Deserialize, Serialize};

/// What happens to a returned item after inspection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReturnDisposition {
    Restock,
    Dispose,
    Repair,
    VendorReturn,
    Donate,
    Quarantine,
    Liquidate,
}

impl ReturnDisposition {
    /// Wire code of the disposition
    pub fn code(&self) -> &'static str {
        match self {
            ReturnDisposition::Restock => "RESTOCK",
            ReturnDisposition::Dispose => "DISPOSE",
            ReturnDisposition::Repair => "REPAIR",
            ReturnDisposition::VendorReturn => "VENDOR_RETURN",
            ReturnDisposition::Donate => "DONATE",
            ReturnDisposition::Quarantine => "QUARANTINE",
            ReturnDisposition::Liquidate => "LIQUIDATE",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            ReturnDisposition::Restock => "Return to stock",
            ReturnDisposition::Dispose => "Dispose",
            ReturnDisposition::Repair => "Send to repair",
            ReturnDisposition::VendorReturn => "Return to vendor",
            ReturnDisposition::Donate => "Donate",
            ReturnDisposition::Quarantine => "Quarantine",
            ReturnDisposition::Liquidate => "Liquidate",
        }
    }

    /// All dispositions
    pub fn all() -> Vec<ReturnDisposition> {
        vec![
            ReturnDisposition::Restock,
            ReturnDisposition::Dispose,
            ReturnDisposition::Repair,
            ReturnDisposition::VendorReturn,
            ReturnDisposition::Donate,
            ReturnDisposition::Quarantine,
            ReturnDisposition::Liquidate,
        ]
    }

    /// Parse from a wire code
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "RESTOCK" => Some(ReturnDisposition::Restock),
            "DISPOSE" => Some(ReturnDisposition::Dispose),
            "REPAIR" => Some(ReturnDisposition::Repair),
            "VENDOR_RETURN" => Some(ReturnDisposition::VendorReturn),
            "DONATE" => Some(ReturnDisposition::Donate),
            "QUARANTINE" => Some(ReturnDisposition::Quarantine),
            "LIQUIDATE" => Some(ReturnDisposition::Liquidate),
            _ => None,
        }
    }

    /// True when the item goes back into sellable inventory
    pub fn is_restock(&self) -> bool {
        matches!(self, ReturnDisposition::Restock)
    }

    /// True when the item leaves inventory with no residual value
    pub fn is_dispose(&self) -> bool {
        matches!(self, ReturnDisposition::Dispose)
    }
}

impl ToString for ReturnDisposition {
    fn to_string(&self) -> String {
        self.code().to_string()
    }
}
