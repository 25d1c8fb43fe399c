//! UseCase executors of the returns workflow

pub mod u101_lookup_order;
pub mod u102_create_return;
pub mod u103_receive_package;
pub mod u104_inspect_item;
pub mod u105_process_refund;
