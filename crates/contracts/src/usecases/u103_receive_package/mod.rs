pub mod request;
pub mod response;

pub use request::ReceivePackageRequest;
pub use response::{ReceivePackageResponse, ReceivedPackage};

use crate::usecases::common::UseCaseMetadata;

pub struct ReceivePackage;

impl UseCaseMetadata for ReceivePackage {
    fn usecase_index() -> &'static str {
        "u103"
    }

    fn usecase_name() -> &'static str {
        "receive_package"
    }

    fn display_name() -> &'static str {
        "Receive package"
    }

    fn description() -> &'static str {
        "Mark an approved or in-transit return as received at the warehouse"
    }
}
