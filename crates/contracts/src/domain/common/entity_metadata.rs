use serde::{Deserialize, Serialize};

/// Lifecycle metadata carried by every aggregate instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityMetadata {
    /// Creation timestamp
    pub created_at: chrono::DateTime<chrono::Utc>,
    /// Last update timestamp
    pub updated_at: chrono::DateTime<chrono::Utc>,
    /// Soft delete flag
    pub is_deleted: bool,
    /// Version for optimistic locking
    pub version: i32,
}

impl EntityMetadata {
    /// Fresh metadata for a newly created aggregate
    pub fn new() -> Self {
        let now = chrono::Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            is_deleted: false,
            version: 0,
        }
    }

    /// Refresh the update timestamp
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now();
    }

    /// Bump the optimistic-lock version
    pub fn increment_version(&mut self) {
        self.version += 1;
    }
}

impl Default for EntityMetadata {
    fn default() -> Self {
        Self::new()
    }
}
