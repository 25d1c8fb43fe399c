//! Dashboard DTOs

pub mod d100_returns_summary;
