pub mod events;
pub mod repository;
pub mod service;
