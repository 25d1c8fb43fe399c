//! Dashboards: read-only aggregated views over the domain tables.

pub mod d100_returns_summary;
