//! Domain aggregates

pub mod common;

pub mod a001_sales_order;
pub mod a002_return_order;
pub mod a003_inspection;
