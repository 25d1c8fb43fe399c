//! UseCase request/response contracts

pub mod common;

pub mod u101_lookup_order;
pub mod u102_create_return;
pub mod u103_receive_package;
pub mod u104_inspect_item;
pub mod u105_process_refund;

#[cfg(test)]
mod tests {
    use super::*;
    use common::UseCaseMetadata;
    use std::collections::HashSet;

    #[test]
    fn usecase_indices_are_unique_and_well_formed() {
        let names = [
            u101_lookup_order::LookupOrder::full_name(),
            u102_create_return::CreateReturn::full_name(),
            u103_receive_package::ReceivePackage::full_name(),
            u104_inspect_item::InspectItem::full_name(),
            u105_process_refund::ProcessRefund::full_name(),
        ];

        let mut seen = HashSet::new();
        for name in &names {
            let (index, rest) = name.split_once('_').expect("index_name form");
            assert!(index.starts_with('u') && index.len() == 4, "{}", name);
            assert!(!rest.is_empty());
            assert!(seen.insert(index.to_string()), "duplicate index in {}", name);
        }
    }
}
