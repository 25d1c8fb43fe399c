pub mod executor;

pub use executor::ProcessRefundExecutor;
