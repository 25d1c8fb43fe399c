//! Shared contracts of the returns-management service: domain
//! aggregates, the returns policy and rule engine, UseCase DTOs and
//! system types. No I/O lives here.

pub mod dashboards;
pub mod domain;
pub mod enums;
pub mod policy;
pub mod shared;
pub mod system;
pub mod usecases;
