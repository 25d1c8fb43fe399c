use super::EntityMetadata;

/// Trait for aggregate roots
///
/// Defines the required instance accessors and class-level metadata for
/// every aggregate in the system.
pub trait AggregateRoot {
    /// Identifier type of the aggregate
    type Id;

    // ============================================================================
    // Instance accessors (data of a concrete record)
    // ============================================================================

    /// Record ID
    fn id(&self) -> Self::Id;

    /// Business code of the record (e.g. "RMA-2025-0001")
    fn code(&self) -> &str;

    /// Description / display name of the record
    fn description(&self) -> &str;

    /// Lifecycle metadata
    fn metadata(&self) -> &EntityMetadata;

    /// Mutable lifecycle metadata
    fn metadata_mut(&mut self) -> &mut EntityMetadata;

    // ============================================================================
    // Class-level metadata (static data)
    // ============================================================================

    /// Aggregate index in the system (e.g. "a001")
    fn aggregate_index() -> &'static str;

    /// Collection name for the DB (e.g. "sales_order")
    fn collection_name() -> &'static str;

    /// Element name for display (singular, e.g. "Sales order")
    fn element_name() -> &'static str;

    /// List name for display (plural, e.g. "Sales orders")
    fn list_name() -> &'static str;

    // ============================================================================
    // Default implementations
    // ============================================================================

    /// Full system name of the aggregate (e.g. "a001_sales_order")
    fn full_name() -> String {
        format!("{}_{}", Self::aggregate_index(), Self::collection_name())
    }

    /// Prefix for DB tables (e.g. "a001_sales_order_")
    fn table_prefix() -> String {
        format!("{}_", Self::full_name())
    }
}
