//! Common types and traits for all UseCases

pub mod error;
pub mod usecase_metadata;

// Re-exports
pub use error::WorkflowError;
pub use usecase_metadata::UseCaseMetadata;
