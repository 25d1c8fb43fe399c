pub mod executor;

pub use executor::InspectItemExecutor;
