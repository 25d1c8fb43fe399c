pub mod request;
pub mod response;

pub use request::LookupOrderRequest;
pub use response::{LookedUpOrder, LookedUpOrderItem, LookupOrderResponse};

use crate::usecases::common::UseCaseMetadata;

pub struct LookupOrder;

impl UseCaseMetadata for LookupOrder {
    fn usecase_index() -> &'static str {
        "u101"
    }

    fn usecase_name() -> &'static str {
        "lookup_order"
    }

    fn display_name() -> &'static str {
        "Order lookup"
    }

    fn description() -> &'static str {
        "Find an order by number and e-mail and evaluate its return eligibility"
    }
}
