//! Cross-cutting contracts

pub mod logger;
