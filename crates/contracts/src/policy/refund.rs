use super::config::ReturnPolicyConfig;
use crate::enums::{ReturnCondition, ReturnDisposition, ReturnReason};
use serde::{Deserialize, Serialize};

/// Inspection facts for one return line, the input to the refund math
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectedItem {
    #[serde(rename = "returnItemId")]
    pub return_item_id: String,
    pub sku: String,
    #[serde(rename = "productName")]
    pub product_name: String,
    #[serde(rename = "quantityReceived")]
    pub quantity_received: i32,
    #[serde(rename = "unitPrice")]
    pub unit_price: f64,
    pub condition: ReturnCondition,
    pub disposition: ReturnDisposition,
}

/// Per-line refund breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRefund {
    #[serde(rename = "returnItemId")]
    pub return_item_id: String,
    pub sku: String,
    #[serde(rename = "baseAmount")]
    pub base_amount: f64,
    #[serde(rename = "conditionDeduction")]
    pub condition_deduction: f64,
    #[serde(rename = "finalAmount")]
    pub final_amount: f64,
}

/// Manual correction applied by staff, positive or negative
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefundAdjustment {
    pub description: String,
    pub amount: f64,
}

/// Full refund breakdown for a return order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefundCalculation {
    #[serde(rename = "itemRefunds")]
    pub item_refunds: Vec<ItemRefund>,
    pub subtotal: f64,
    #[serde(rename = "restockingFee")]
    pub restocking_fee: f64,
    pub adjustments: f64,
    #[serde(rename = "shippingRefund")]
    pub shipping_refund: f64,
    #[serde(rename = "finalRefundAmount")]
    pub final_refund_amount: f64,
}

/// Compute the refund for a set of inspected items.
///
/// Per item: `base = quantity_received x unit_price`, then the
/// condition rate trims it to `final = base x rate`. The restocking fee
/// applies to the rated subtotal and is waived entirely when the return
/// reason puts the fault on the merchant (DEFECTIVE, WRONG_ITEM).
/// Manual adjustments and the shipping refund are added last, signed.
pub fn calculate_refund(
    items: &[InspectedItem],
    reason: ReturnReason,
    adjustments: &[RefundAdjustment],
    shipping_refund: f64,
    policy: &ReturnPolicyConfig,
) -> RefundCalculation {
    let item_refunds: Vec<ItemRefund> = items
        .iter()
        .map(|item| {
            let base_amount = item.quantity_received as f64 * item.unit_price;
            let rate = policy.condition_refund_rates.rate_for(item.condition);
            let final_amount = base_amount * rate;
            ItemRefund {
                return_item_id: item.return_item_id.clone(),
                sku: item.sku.clone(),
                base_amount,
                condition_deduction: base_amount - final_amount,
                final_amount,
            }
        })
        .collect();

    let subtotal: f64 = item_refunds.iter().map(|r| r.final_amount).sum();
    let restocking_fee = if reason.is_merchant_fault() {
        0.0
    } else {
        subtotal * policy.restocking_fee_percent / 100.0
    };
    let adjustment_total: f64 = adjustments.iter().map(|a| a.amount).sum();

    RefundCalculation {
        item_refunds,
        subtotal,
        restocking_fee,
        adjustments: adjustment_total,
        shipping_refund,
        final_refund_amount: subtotal - restocking_fee + adjustment_total + shipping_refund,
    }
}

/// A refund is partial when the customer gets back less than the
/// full price of everything they asked to return: fewer units arrived
/// than were requested, or a condition rate below 1.0 trimmed the
/// subtotal. Fees and adjustments are policy, not shortfall, and do
/// not make a refund partial on their own.
pub fn is_partial_refund(
    items: &[InspectedItem],
    total_quantity_requested: i32,
    policy: &ReturnPolicyConfig,
) -> bool {
    let received: i32 = items.iter().map(|i| i.quantity_received).sum();
    if received < total_quantity_requested {
        return true;
    }
    items.iter().any(|item| {
        item.quantity_received > 0
            && policy.condition_refund_rates.rate_for(item.condition) < 1.0
    })
}

/// Per-line view inside an inspection summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectionLine {
    #[serde(rename = "returnItemId")]
    pub return_item_id: String,
    pub sku: String,
    #[serde(rename = "productName")]
    pub product_name: String,
    #[serde(rename = "quantityReceived")]
    pub quantity_received: i32,
    #[serde(rename = "quantityRestockable")]
    pub quantity_restockable: i32,
    #[serde(rename = "quantityDisposed")]
    pub quantity_disposed: i32,
    pub condition: ReturnCondition,
    pub disposition: ReturnDisposition,
    #[serde(rename = "refundAmount")]
    pub refund_amount: f64,
}

/// Rollup of the inspection work on one return order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectionSummary {
    #[serde(rename = "returnOrderId")]
    pub return_order_id: String,
    #[serde(rename = "totalItemsExpected")]
    pub total_items_expected: i32,
    #[serde(rename = "totalItemsInspected")]
    pub total_items_inspected: i32,
    #[serde(rename = "totalQuantityReceived")]
    pub total_quantity_received: i32,
    #[serde(rename = "totalRestockable")]
    pub total_restockable: i32,
    #[serde(rename = "totalDisposed")]
    pub total_disposed: i32,
    #[serde(rename = "estimatedRefund")]
    pub estimated_refund: f64,
    #[serde(rename = "restockingFee")]
    pub restocking_fee: f64,
    pub inspections: Vec<InspectionLine>,
}

/// Summarize inspections for one return order: counts by disposition
/// and the fee-adjusted refund estimate, before manual adjustments.
pub fn summarize_inspections(
    return_order_id: &str,
    total_items_expected: i32,
    items: &[InspectedItem],
    reason: ReturnReason,
    policy: &ReturnPolicyConfig,
) -> InspectionSummary {
    let calculation = calculate_refund(items, reason, &[], 0.0, policy);

    let inspections: Vec<InspectionLine> = items
        .iter()
        .zip(calculation.item_refunds.iter())
        .map(|(item, refund)| InspectionLine {
            return_item_id: item.return_item_id.clone(),
            sku: item.sku.clone(),
            product_name: item.product_name.clone(),
            quantity_received: item.quantity_received,
            quantity_restockable: if item.disposition.is_restock() {
                item.quantity_received
            } else {
                0
            },
            quantity_disposed: if item.disposition.is_dispose() {
                item.quantity_received
            } else {
                0
            },
            condition: item.condition,
            disposition: item.disposition,
            refund_amount: refund.final_amount,
        })
        .collect();

    InspectionSummary {
        return_order_id: return_order_id.to_string(),
        total_items_expected,
        total_items_inspected: items.len() as i32,
        total_quantity_received: items.iter().map(|i| i.quantity_received).sum(),
        total_restockable: inspections.iter().map(|l| l.quantity_restockable).sum(),
        total_disposed: inspections.iter().map(|l| l.quantity_disposed).sum(),
        estimated_refund: calculation.subtotal - calculation.restocking_fee,
        restocking_fee: calculation.restocking_fee,
        inspections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> ReturnPolicyConfig {
        ReturnPolicyConfig::default()
    }

    fn item(id: &str, qty: i32, price: f64, condition: ReturnCondition) -> InspectedItem {
        InspectedItem {
            return_item_id: id.to_string(),
            sku: format!("SKU-{}", id),
            product_name: format!("Product {}", id),
            quantity_received: qty,
            unit_price: price,
            condition,
            disposition: ReturnDisposition::Restock,
        }
    }

    #[test]
    fn condition_rate_trims_base_amount() {
        let items = vec![item("1", 2, 100.0, ReturnCondition::Good)];
        let calc = calculate_refund(
            &items,
            ReturnReason::Defective,
            &[],
            0.0,
            &policy(),
        );
        assert_eq!(calc.item_refunds[0].base_amount, 200.0);
        assert_eq!(calc.item_refunds[0].final_amount, 150.0);
        assert_eq!(calc.item_refunds[0].condition_deduction, 50.0);
        assert_eq!(calc.subtotal, 150.0);
    }

    #[test]
    fn restocking_fee_applies_to_rated_subtotal() {
        let items = vec![item("1", 2, 100.0, ReturnCondition::Good)];
        let calc = calculate_refund(
            &items,
            ReturnReason::NoLongerNeeded,
            &[],
            0.0,
            &policy(),
        );
        assert_eq!(calc.subtotal, 150.0);
        assert_eq!(calc.restocking_fee, 22.5);
        assert_eq!(calc.final_refund_amount, 127.5);
    }

    #[test]
    fn fee_waived_when_merchant_at_fault() {
        let items = vec![item("1", 1, 80.0, ReturnCondition::NewUnopened)];
        for reason in [ReturnReason::Defective, ReturnReason::WrongItem] {
            let calc = calculate_refund(&items, reason, &[], 0.0, &policy());
            assert_eq!(calc.restocking_fee, 0.0);
            assert_eq!(calc.final_refund_amount, 80.0);
        }
        let charged = calculate_refund(
            &items,
            ReturnReason::OrderedByMistake,
            &[],
            0.0,
            &policy(),
        );
        assert_eq!(charged.restocking_fee, 12.0);
    }

    #[test]
    fn adjustments_and_shipping_are_signed_addends() {
        let items = vec![item("1", 1, 100.0, ReturnCondition::NewUnopened)];
        let adjustments = vec![
            RefundAdjustment {
                description: "Goodwill credit".to_string(),
                amount: 10.0,
            },
            RefundAdjustment {
                description: "Missing charger".to_string(),
                amount: -25.0,
            },
        ];
        let calc = calculate_refund(
            &items,
            ReturnReason::Defective,
            &adjustments,
            7.5,
            &policy(),
        );
        assert_eq!(calc.adjustments, -15.0);
        assert_eq!(calc.shipping_refund, 7.5);
        assert_eq!(calc.final_refund_amount, 100.0 - 15.0 + 7.5);
    }

    #[test]
    fn fifty_dollar_good_item_end_to_end() {
        // One unit at $50, GOOD (0.75), reason NO_LONGER_NEEDED, 15% fee
        let items = vec![item("1", 1, 50.0, ReturnCondition::Good)];
        let calc = calculate_refund(
            &items,
            ReturnReason::NoLongerNeeded,
            &[],
            0.0,
            &policy(),
        );
        assert_eq!(calc.item_refunds[0].final_amount, 37.5);
        assert_eq!(calc.restocking_fee, 5.625);
        assert_eq!(calc.final_refund_amount, 31.875);
    }

    #[test]
    fn no_items_means_zero_everywhere() {
        let calc = calculate_refund(&[], ReturnReason::Other, &[], 0.0, &policy());
        assert!(calc.item_refunds.is_empty());
        assert_eq!(calc.subtotal, 0.0);
        assert_eq!(calc.restocking_fee, 0.0);
        assert_eq!(calc.final_refund_amount, 0.0);
    }

    #[test]
    fn short_receipt_is_partial() {
        let items = vec![item("1", 1, 50.0, ReturnCondition::NewUnopened)];
        assert!(is_partial_refund(&items, 2, &policy()));
        assert!(!is_partial_refund(&items, 1, &policy()));
    }

    #[test]
    fn reduced_condition_rate_is_partial() {
        let items = vec![item("1", 1, 50.0, ReturnCondition::Good)];
        assert!(is_partial_refund(&items, 1, &policy()));

        let full = vec![item("1", 1, 50.0, ReturnCondition::Damaged)]; // rate 1.0
        assert!(!is_partial_refund(&full, 1, &policy()));
    }

    #[test]
    fn summary_counts_restock_and_dispose_quantities() {
        let mut shelf = item("1", 2, 30.0, ReturnCondition::LikeNew);
        shelf.disposition = ReturnDisposition::Restock;
        let mut trash = item("2", 1, 45.0, ReturnCondition::Poor);
        trash.disposition = ReturnDisposition::Dispose;
        let mut vendor = item("3", 1, 60.0, ReturnCondition::Defective);
        vendor.disposition = ReturnDisposition::VendorReturn;

        let summary = summarize_inspections(
            "ro-1",
            4,
            &[shelf, trash, vendor],
            ReturnReason::Defective,
            &policy(),
        );
        assert_eq!(summary.total_items_expected, 4);
        assert_eq!(summary.total_items_inspected, 3);
        assert_eq!(summary.total_quantity_received, 4);
        assert_eq!(summary.total_restockable, 2);
        assert_eq!(summary.total_disposed, 1);
        // 2x30x0.85 + 1x45x0.5 + 1x60x1.0 with the fee waived
        assert_eq!(summary.restocking_fee, 0.0);
        assert_eq!(summary.estimated_refund, 51.0 + 22.5 + 60.0);
    }
}
