use crate::enums::{ReturnCondition, ReturnDisposition};
use serde::{Deserialize, Serialize};

/// Process-wide returns policy
///
/// Loaded once at startup from the `[return_policy]` section of
/// config.toml and treated as immutable for the duration of any request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReturnPolicyConfig {
    /// Days after shipment during which a return may be initiated
    pub return_window_days: i64,
    /// Estimated refunds at or below this amount skip manual approval
    pub auto_approve_threshold: f64,
    /// Restocking fee as a percentage of the item subtotal
    pub restocking_fee_percent: f64,
    /// Originating-order statuses from which a return may be requested
    pub allowed_order_statuses: Vec<String>,
    /// Suggest a disposition from the condition when the inspector leaves it blank
    pub auto_disposition: bool,
    /// Refund-rate multiplier per item condition, each in [0, 1]
    pub condition_refund_rates: ConditionRefundRates,
    /// Default disposition per item condition
    pub disposition_defaults: DispositionDefaults,
}

impl ReturnPolicyConfig {
    /// Whether an estimated refund needs manual approval.
    /// The threshold is inclusive: an estimate equal to it auto-approves.
    pub fn requires_approval(&self, estimated_refund: f64) -> bool {
        estimated_refund > self.auto_approve_threshold
    }

    /// True when the order status permits initiating a return
    pub fn order_status_allowed(&self, order_status: &str) -> bool {
        self.allowed_order_statuses
            .iter()
            .any(|s| s == order_status)
    }

    /// Policy-suggested disposition, if auto-disposition is enabled
    pub fn default_disposition_for(&self, condition: ReturnCondition) -> Option<ReturnDisposition> {
        if self.auto_disposition {
            Some(self.disposition_defaults.for_condition(condition))
        } else {
            None
        }
    }

    /// Check the policy values are usable
    pub fn validate(&self) -> Result<(), String> {
        if self.return_window_days <= 0 {
            return Err("return_window_days must be positive".into());
        }
        if self.auto_approve_threshold < 0.0 {
            return Err("auto_approve_threshold cannot be negative".into());
        }
        if !(0.0..=100.0).contains(&self.restocking_fee_percent) {
            return Err("restocking_fee_percent must be between 0 and 100".into());
        }
        if self.allowed_order_statuses.is_empty() {
            return Err("allowed_order_statuses cannot be empty".into());
        }
        self.condition_refund_rates.validate()
    }
}

impl Default for ReturnPolicyConfig {
    fn default() -> Self {
        Self {
            return_window_days: 30,
            auto_approve_threshold: 500.0,
            restocking_fee_percent: 15.0,
            allowed_order_statuses: vec!["SHIPPED".to_string(), "DELIVERED".to_string()],
            auto_disposition: true,
            condition_refund_rates: ConditionRefundRates::default(),
            disposition_defaults: DispositionDefaults::default(),
        }
    }
}

/// Refund-rate multiplier for each item condition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionRefundRates {
    pub new_unopened: f64,
    pub new_opened: f64,
    pub like_new: f64,
    pub good: f64,
    pub fair: f64,
    pub poor: f64,
    pub defective: f64,
    pub damaged: f64,
    pub expired: f64,
    pub missing_parts: f64,
}

impl ConditionRefundRates {
    /// Rate for a condition
    pub fn rate_for(&self, condition: ReturnCondition) -> f64 {
        match condition {
            ReturnCondition::NewUnopened => self.new_unopened,
            ReturnCondition::NewOpened => self.new_opened,
            ReturnCondition::LikeNew => self.like_new,
            ReturnCondition::Good => self.good,
            ReturnCondition::Fair => self.fair,
            ReturnCondition::Poor => self.poor,
            ReturnCondition::Defective => self.defective,
            ReturnCondition::Damaged => self.damaged,
            ReturnCondition::Expired => self.expired,
            ReturnCondition::MissingParts => self.missing_parts,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        for condition in ReturnCondition::all() {
            let rate = self.rate_for(condition);
            if !(0.0..=1.0).contains(&rate) {
                return Err(format!(
                    "refund rate for {} must be between 0 and 1, got {}",
                    condition.code(),
                    rate
                ));
            }
        }
        Ok(())
    }
}

impl Default for ConditionRefundRates {
    fn default() -> Self {
        Self {
            new_unopened: 1.0,
            new_opened: 0.85,
            like_new: 0.85,
            good: 0.75,
            fair: 0.5,
            poor: 0.5,
            defective: 1.0,
            damaged: 1.0,
            expired: 1.0,
            missing_parts: 0.5,
        }
    }
}

/// Default post-inspection disposition for each item condition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispositionDefaults {
    pub new_unopened: ReturnDisposition,
    pub new_opened: ReturnDisposition,
    pub like_new: ReturnDisposition,
    pub good: ReturnDisposition,
    pub fair: ReturnDisposition,
    pub poor: ReturnDisposition,
    pub defective: ReturnDisposition,
    pub damaged: ReturnDisposition,
    pub expired: ReturnDisposition,
    pub missing_parts: ReturnDisposition,
}

impl DispositionDefaults {
    /// Disposition for a condition
    pub fn for_condition(&self, condition: ReturnCondition) -> ReturnDisposition {
        match condition {
            ReturnCondition::NewUnopened => self.new_unopened,
            ReturnCondition::NewOpened => self.new_opened,
            ReturnCondition::LikeNew => self.like_new,
            ReturnCondition::Good => self.good,
            ReturnCondition::Fair => self.fair,
            ReturnCondition::Poor => self.poor,
            ReturnCondition::Defective => self.defective,
            ReturnCondition::Damaged => self.damaged,
            ReturnCondition::Expired => self.expired,
            ReturnCondition::MissingParts => self.missing_parts,
        }
    }
}

impl Default for DispositionDefaults {
    fn default() -> Self {
        Self {
            new_unopened: ReturnDisposition::Restock,
            new_opened: ReturnDisposition::Restock,
            like_new: ReturnDisposition::Restock,
            good: ReturnDisposition::Restock,
            fair: ReturnDisposition::Liquidate,
            poor: ReturnDisposition::Dispose,
            defective: ReturnDisposition::VendorReturn,
            damaged: ReturnDisposition::Dispose,
            expired: ReturnDisposition::Dispose,
            missing_parts: ReturnDisposition::Quarantine,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_matches_store_rules() {
        let policy = ReturnPolicyConfig::default();
        assert_eq!(policy.return_window_days, 30);
        assert_eq!(policy.auto_approve_threshold, 500.0);
        assert_eq!(policy.restocking_fee_percent, 15.0);
        assert_eq!(policy.allowed_order_statuses, vec!["SHIPPED", "DELIVERED"]);
        assert!(policy.auto_disposition);
        assert_eq!(
            policy.condition_refund_rates.rate_for(ReturnCondition::Good),
            0.75
        );
        assert_eq!(
            policy
                .condition_refund_rates
                .rate_for(ReturnCondition::Defective),
            1.0
        );
        assert!(policy.validate().is_ok());
    }

    #[test]
    fn approval_threshold_is_inclusive() {
        let policy = ReturnPolicyConfig::default();
        assert!(!policy.requires_approval(499.99));
        assert!(!policy.requires_approval(500.0));
        assert!(policy.requires_approval(500.01));
    }

    #[test]
    fn partial_toml_override_keeps_defaults() {
        let toml_src = r#"
            return_window_days = 45
            [condition_refund_rates]
            good = 0.8
        "#;
        let policy: ReturnPolicyConfig = toml::from_str(toml_src).unwrap();
        assert_eq!(policy.return_window_days, 45);
        assert_eq!(policy.auto_approve_threshold, 500.0);
        assert_eq!(
            policy.condition_refund_rates.rate_for(ReturnCondition::Good),
            0.8
        );
        assert_eq!(
            policy
                .condition_refund_rates
                .rate_for(ReturnCondition::NewUnopened),
            1.0
        );
    }

    #[test]
    fn disposition_defaults_cover_every_condition() {
        let policy = ReturnPolicyConfig::default();
        assert_eq!(
            policy.default_disposition_for(ReturnCondition::Good),
            Some(ReturnDisposition::Restock)
        );
        assert_eq!(
            policy.default_disposition_for(ReturnCondition::Defective),
            Some(ReturnDisposition::VendorReturn)
        );
        assert_eq!(
            policy.default_disposition_for(ReturnCondition::MissingParts),
            Some(ReturnDisposition::Quarantine)
        );

        let manual = ReturnPolicyConfig {
            auto_disposition: false,
            ..ReturnPolicyConfig::default()
        };
        assert_eq!(manual.default_disposition_for(ReturnCondition::Good), None);
    }

    #[test]
    fn validate_rejects_bad_rates() {
        let mut policy = ReturnPolicyConfig::default();
        policy.condition_refund_rates.good = 1.5;
        assert!(policy.validate().is_err());
    }
}
