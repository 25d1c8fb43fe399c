pub mod executor;

pub use executor::ReceivePackageExecutor;
