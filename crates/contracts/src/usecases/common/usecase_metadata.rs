/// UseCase metadata for identification and documentation
pub trait UseCaseMetadata {
    /// UseCase index (e.g. "u101")
    fn usecase_index() -> &'static str;

    /// Technical name (e.g. "lookup_order")
    fn usecase_name() -> &'static str;

    /// Display name (e.g. "Order lookup")
    fn display_name() -> &'static str;

    /// UseCase description
    fn description() -> &'static str {
        ""
    }

    /// Full name of the form "u101_lookup_order"
    fn full_name() -> String {
        format!("{}_{}", Self::usecase_index(), Self::usecase_name())
    }
}
