pub mod aggregate;

pub use aggregate::{SalesOrder, SalesOrderId, SalesOrderLine};
