pub mod request;
pub mod response;

pub use request::ProcessRefundRequest;
pub use response::ProcessRefundResponse;

use crate::usecases::common::UseCaseMetadata;

pub struct ProcessRefund;

impl UseCaseMetadata for ProcessRefund {
    fn usecase_index() -> &'static str {
        "u105"
    }

    fn usecase_name() -> &'static str {
        "process_refund"
    }

    fn display_name() -> &'static str {
        "Process refund"
    }

    fn description() -> &'static str {
        "Calculate and issue the refund for a fully inspected return"
    }
}
