pub mod aggregate;
pub mod lifecycle;

pub use aggregate::{
    ReturnItem, ReturnOrder, ReturnOrderHeader, ReturnOrderId, ReturnOrderListItem,
    ReturnOrderState,
};
pub use lifecycle::{
    allowed_sources, apply, is_terminal, InvalidTransition, ReturnEvent, ReturnEventRecord,
    Transition, TRANSITIONS,
};
