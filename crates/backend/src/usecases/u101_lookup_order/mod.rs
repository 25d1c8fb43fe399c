pub mod executor;

pub use executor::LookupOrderExecutor;
