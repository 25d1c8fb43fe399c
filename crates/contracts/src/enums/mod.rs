//! Closed enums of the returns domain

pub mod refund_method;
pub mod refund_status;
pub mod return_condition;
pub mod return_disposition;
pub mod return_item_status;
pub mod return_reason;
pub mod return_status;

// Re-exports
pub use refund_method::RefundMethod;
pub use refund_status::RefundStatus;
pub use return_condition::ReturnCondition;
pub use return_disposition::ReturnDisposition;
pub use return_item_status::ReturnItemStatus;
pub use return_reason::ReturnReason;
pub use return_status::ReturnStatus;
