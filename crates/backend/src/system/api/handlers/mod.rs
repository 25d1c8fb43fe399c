// Authentication handlers
pub mod auth;

// Staff account handlers
pub mod users;

// Log viewer handlers
pub mod logs;
