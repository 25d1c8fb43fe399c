// Aggregate handlers
pub mod a001_sales_order;
pub mod a002_return_order;

// Dashboard handlers
pub mod d100_returns_summary;

// UseCase handlers
pub mod usecases;
