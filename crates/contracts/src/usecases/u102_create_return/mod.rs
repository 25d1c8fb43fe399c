pub mod request;
pub mod response;

pub use request::{CreateReturnItem, CreateReturnRequest};
pub use response::{CreateReturnResponse, CreatedReturn};

use crate::usecases::common::UseCaseMetadata;

pub struct CreateReturn;

impl UseCaseMetadata for CreateReturn {
    fn usecase_index() -> &'static str {
        "u102"
    }

    fn usecase_name() -> &'static str {
        "create_return"
    }

    fn display_name() -> &'static str {
        "Create return"
    }

    fn description() -> &'static str {
        "Validate a return request, allocate an RMA number and decide approval"
    }
}
