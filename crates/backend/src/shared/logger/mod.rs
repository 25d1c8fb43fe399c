pub mod repository;

use repository::log_event_internal;

/// Log a server-side event
///
/// # Examples
/// ```ignore
/// logger::log("startup", "Server started");
/// logger::log("returns", "RMA-2025-0001 approved");
/// ```
pub fn log(category: &str, message: &str) {
    log_event_internal("server", category, message);
}
