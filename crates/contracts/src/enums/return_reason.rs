use serde::{Deserialize, Serialize};

/// Customer-stated reason for a return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReturnReason {
    Defective,
    WrongItem,
    NotAsDescribed,
    NoLongerNeeded,
    OrderedByMistake,
    BetterPrice,
    DamagedShipping,
    Expired,
    Other,
}

impl ReturnReason {
    /// Wire code of the reason
    pub fn code(&self) -> &'static str {
        match self {
            ReturnReason::Defective => "DEFECTIVE",
            ReturnReason::WrongItem => "WRONG_ITEM",
            ReturnReason::NotAsDescribed => "NOT_AS_DESCRIBED",
            ReturnReason::NoLongerNeeded => "NO_LONGER_NEEDED",
            ReturnReason::OrderedByMistake => "ORDERED_BY_MISTAKE",
            ReturnReason::BetterPrice => "BETTER_PRICE",
            ReturnReason::DamagedShipping => "DAMAGED_SHIPPING",
            ReturnReason::Expired => "EXPIRED",
            ReturnReason::Other => "OTHER",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            ReturnReason::Defective => "Item is defective",
            ReturnReason::WrongItem => "Received wrong item",
            ReturnReason::NotAsDescribed => "Not as described",
            ReturnReason::NoLongerNeeded => "No longer needed",
            ReturnReason::OrderedByMistake => "Ordered by mistake",
            ReturnReason::BetterPrice => "Found a better price",
            ReturnReason::DamagedShipping => "Damaged during shipping",
            ReturnReason::Expired => "Item expired",
            ReturnReason::Other => "Other",
        }
    }

    /// All reasons
    pub fn all() -> Vec<ReturnReason> {
        vec![
            ReturnReason::Defective,
            ReturnReason::WrongItem,
            ReturnReason::NotAsDescribed,
            ReturnReason::NoLongerNeeded,
            ReturnReason::OrderedByMistake,
            ReturnReason::BetterPrice,
            ReturnReason::DamagedShipping,
            ReturnReason::Expired,
            ReturnReason::Other,
        ]
    }

    /// Parse from a wire code
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "DEFECTIVE" => Some(ReturnReason::Defective),
            "WRONG_ITEM" => Some(ReturnReason::WrongItem),
            "NOT_AS_DESCRIBED" => Some(ReturnReason::NotAsDescribed),
            "NO_LONGER_NEEDED" => Some(ReturnReason::NoLongerNeeded),
            "ORDERED_BY_MISTAKE" => Some(ReturnReason::OrderedByMistake),
            "BETTER_PRICE" => Some(ReturnReason::BetterPrice),
            "DAMAGED_SHIPPING" => Some(ReturnReason::DamagedShipping),
            "EXPIRED" => Some(ReturnReason::Expired),
            "OTHER" => Some(ReturnReason::Other),
            _ => None,
        }
    }

    /// The restocking fee is waived when the return is the merchant's fault
    pub fn is_merchant_fault(&self) -> bool {
        matches!(self, ReturnReason::Defective | ReturnReason::WrongItem)
    }
}

impl ToString for ReturnReason {
    fn to_string(&self) -> String {
        self.code().to_string()
    }
}
