use crate::enums::{ReturnCondition, ReturnDisposition};
use serde::{Deserialize, Serialize};

/// Inspector records the verdict on one return line.
///
/// The inspected item is addressed by the URL; a repeat submission for
/// the same item replaces the earlier verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectItemRequest {
    /// Units actually in the box; may be less than requested
    #[serde(rename = "quantityReceived")]
    pub quantity_received: i32,

    pub condition: ReturnCondition,

    #[serde(rename = "conditionNotes")]
    #[serde(default)]
    pub condition_notes: Option<String>,

    /// Omitted: the policy's auto-disposition mapping decides
    #[serde(default)]
    pub disposition: Option<ReturnDisposition>,

    #[serde(rename = "dispositionNotes")]
    #[serde(default)]
    pub disposition_notes: Option<String>,

    /// Shelf location when restocking
    #[serde(rename = "restockLocationId")]
    #[serde(default)]
    pub restock_location_id: Option<String>,

    #[serde(rename = "photoUrls")]
    #[serde(default)]
    pub photo_urls: Vec<String>,
}
