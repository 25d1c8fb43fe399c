use crate::domain::common::{AggregateId, AggregateRoot, BaseAggregate, EntityMetadata};
use crate::enums::{ReturnCondition, ReturnDisposition};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// ID type for inspection records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InspectionId(pub Uuid);

impl InspectionId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
    pub fn value(&self) -> Uuid {
        self.0
    }
}

impl AggregateId for InspectionId {
    fn as_string(&self) -> String {
        self.0.to_string()
    }
    fn from_string(s: &str) -> Result<Self, String> {
        Uuid::parse_str(s)
            .map(InspectionId::new)
            .map_err(|e| format!("Invalid UUID: {}", e))
    }
}

/// Inspection of one return line (aggregate)
///
/// One record per return item: a re-inspection overwrites the previous
/// record rather than adding a second one, so refund math always sees
/// exactly one verdict per line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inspection {
    #[serde(flatten)]
    pub base: BaseAggregate<InspectionId>,

    /// Return order the inspected line belongs to
    #[serde(rename = "returnOrderId")]
    pub return_order_id: String,

    /// The inspected return line (a002_return_items.id)
    #[serde(rename = "returnItemId")]
    pub return_item_id: String,

    /// Units actually in the box
    #[serde(rename = "quantityReceived")]
    pub quantity_received: i32,

    /// Judged condition
    pub condition: ReturnCondition,

    /// Inspector's notes on the condition
    #[serde(rename = "conditionNotes")]
    #[serde(default)]
    pub condition_notes: Option<String>,

    /// Where the item goes next
    pub disposition: ReturnDisposition,

    /// Inspector's notes on the disposition
    #[serde(rename = "dispositionNotes")]
    #[serde(default)]
    pub disposition_notes: Option<String>,

    /// Shelf location when the disposition is RESTOCK
    #[serde(rename = "restockLocationId")]
    #[serde(default)]
    pub restock_location_id: Option<String>,

    /// Photos taken during inspection
    #[serde(rename = "photoUrls")]
    #[serde(default)]
    pub photo_urls: Vec<String>,

    /// Staff member who inspected
    #[serde(rename = "inspectedBy")]
    #[serde(default)]
    pub inspected_by: Option<String>,

    /// When the inspection happened
    #[serde(rename = "inspectedAt")]
    pub inspected_at: DateTime<Utc>,
}

impl Inspection {
    #[allow(clippy::too_many_arguments)]
    pub fn new_for_insert(
        code: String,
        return_order_id: String,
        return_item_id: String,
        quantity_received: i32,
        condition: ReturnCondition,
        condition_notes: Option<String>,
        disposition: ReturnDisposition,
        disposition_notes: Option<String>,
        restock_location_id: Option<String>,
        photo_urls: Vec<String>,
        inspected_by: Option<String>,
    ) -> Self {
        let description = format!("Inspection of item {}", return_item_id);
        let base = BaseAggregate::new(InspectionId::new_v4(), code, description);
        Self {
            base,
            return_order_id,
            return_item_id,
            quantity_received,
            condition,
            condition_notes,
            disposition,
            disposition_notes,
            restock_location_id,
            photo_urls,
            inspected_by,
            inspected_at: Utc::now(),
        }
    }

    pub fn to_string_id(&self) -> String {
        self.base.id.as_string()
    }

    pub fn touch_updated(&mut self) {
        self.base.touch();
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.return_order_id.trim().is_empty() {
            return Err("Return order reference is required".into());
        }
        if self.return_item_id.trim().is_empty() {
            return Err("Return item reference is required".into());
        }
        if self.quantity_received < 0 {
            return Err("Received quantity cannot be negative".into());
        }
        Ok(())
    }

    pub fn before_write(&mut self) {
        self.touch_updated();
    }
}

impl AggregateRoot for Inspection {
    type Id = InspectionId;
    fn id(&self) -> Self::Id {
        self.base.id
    }
    fn code(&self) -> &str {
        &self.base.code
    }
    fn description(&self) -> &str {
        &self.base.description
    }
    fn metadata(&self) -> &EntityMetadata {
        &self.base.metadata
    }
    fn metadata_mut(&mut self) -> &mut EntityMetadata {
        &mut self.base.metadata
    }
    fn aggregate_index() -> &'static str {
        "a003"
    }
    fn collection_name() -> &'static str {
        "inspection"
    }
    fn element_name() -> &'static str {
        "Inspection"
    }
    fn list_name() -> &'static str {
        "Inspections"
    }
}
