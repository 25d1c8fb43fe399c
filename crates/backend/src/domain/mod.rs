//! Domain aggregates: repositories and services

pub mod a001_sales_order;
pub mod a002_return_order;
pub mod a003_inspection;
