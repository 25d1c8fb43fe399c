//! Returns policy: configuration, the eligibility window, and refund math.
//!
//! Everything here is pure. The backend loads one `ReturnPolicyConfig`
//! at startup and passes it by reference into these functions.

pub mod config;
pub mod eligibility;
pub mod refund;

// Re-exports
pub use config::{ConditionRefundRates, DispositionDefaults, ReturnPolicyConfig};
pub use eligibility::{evaluate_order, quantity_available, ReturnEligibility};
pub use refund::{
    calculate_refund, is_partial_refund, summarize_inspections, InspectedItem, InspectionLine,
    InspectionSummary, ItemRefund, RefundAdjustment, RefundCalculation,
};
