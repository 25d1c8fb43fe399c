use serde::{Deserialize, Serialize};

/// Warehouse scans an inbound return package
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ReceivePackageRequest {
    /// Carrier tracking number, if the label has one
    #[serde(rename = "trackingNumber")]
    #[serde(default)]
    pub tracking_number: Option<String>,
}
