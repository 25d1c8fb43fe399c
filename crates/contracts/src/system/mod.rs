//! System-level contracts: authentication and staff accounts

pub mod auth;
pub mod users;
