pub mod request;
pub mod response;

pub use request::InspectItemRequest;
pub use response::InspectItemResponse;

use crate::usecases::common::UseCaseMetadata;

pub struct InspectItem;

impl UseCaseMetadata for InspectItem {
    fn usecase_index() -> &'static str {
        "u104"
    }

    fn usecase_name() -> &'static str {
        "inspect_item"
    }

    fn display_name() -> &'static str {
        "Inspect item"
    }

    fn description() -> &'static str {
        "Record condition and disposition for one received return line"
    }
}
