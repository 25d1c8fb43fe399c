use super::config::ReturnPolicyConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of the return-window check for an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnEligibility {
    #[serde(rename = "isEligible")]
    pub is_eligible: bool,
    /// Why the order is not eligible, when it is not
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Days left in the return window, when eligible
    #[serde(rename = "daysRemaining")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_remaining: Option<i64>,
}

impl ReturnEligibility {
    pub fn eligible(days_remaining: i64) -> Self {
        Self {
            is_eligible: true,
            reason: None,
            days_remaining: Some(days_remaining),
        }
    }

    pub fn ineligible(reason: impl Into<String>) -> Self {
        Self {
            is_eligible: false,
            reason: Some(reason.into()),
            days_remaining: None,
        }
    }
}

/// Evaluate whether an order is inside its return window.
///
/// Whole days only: `days_since_ship` is the floor of the elapsed time,
/// so the window closes at the start of day `return_window_days + 1`.
pub fn evaluate_order(
    order_status: &str,
    shipped_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    policy: &ReturnPolicyConfig,
) -> ReturnEligibility {
    if !policy.order_status_allowed(order_status) {
        return ReturnEligibility::ineligible("order status does not allow returns");
    }

    let Some(shipped_at) = shipped_at else {
        return ReturnEligibility::ineligible("not yet shipped");
    };

    let days_since_ship = (now - shipped_at).num_days();
    if days_since_ship > policy.return_window_days {
        return ReturnEligibility::ineligible("return window expired");
    }

    ReturnEligibility::eligible((policy.return_window_days - days_since_ship).max(0))
}

/// Units of an order line still available for a new return request.
/// Never negative, whatever the stored counters say.
pub fn quantity_available(quantity: i32, quantity_returned: i32) -> i32 {
    (quantity - quantity_returned).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn policy() -> ReturnPolicyConfig {
        ReturnPolicyConfig::default()
    }

    #[test]
    fn unshipped_order_is_ineligible() {
        let result = evaluate_order("SHIPPED", None, Utc::now(), &policy());
        assert!(!result.is_eligible);
        assert_eq!(result.reason.as_deref(), Some("not yet shipped"));
        assert_eq!(result.days_remaining, None);
    }

    #[test]
    fn order_inside_window_is_eligible() {
        let now = Utc::now();
        let shipped = now - Duration::days(10);
        let result = evaluate_order("SHIPPED", Some(shipped), now, &policy());
        assert!(result.is_eligible);
        assert_eq!(result.days_remaining, Some(20));
    }

    #[test]
    fn window_boundary_day_is_still_eligible() {
        let now = Utc::now();
        let shipped = now - Duration::days(30);
        let result = evaluate_order("DELIVERED", Some(shipped), now, &policy());
        assert!(result.is_eligible);
        assert_eq!(result.days_remaining, Some(0));
    }

    #[test]
    fn expired_window_is_ineligible() {
        let now = Utc::now();
        let shipped = now - Duration::days(31);
        let result = evaluate_order("SHIPPED", Some(shipped), now, &policy());
        assert!(!result.is_eligible);
        assert_eq!(result.reason.as_deref(), Some("return window expired"));
    }

    #[test]
    fn partial_day_counts_as_floor() {
        let now = Utc::now();
        // 30 days and 23 hours elapsed: still day 30, still eligible
        let shipped = now - Duration::days(30) - Duration::hours(23);
        let result = evaluate_order("SHIPPED", Some(shipped), now, &policy());
        assert!(result.is_eligible);
        assert_eq!(result.days_remaining, Some(0));
    }

    #[test]
    fn disallowed_order_status_is_ineligible() {
        let now = Utc::now();
        let shipped = now - Duration::days(1);
        let result = evaluate_order("CANCELLED", Some(shipped), now, &policy());
        assert!(!result.is_eligible);
        assert_eq!(
            result.reason.as_deref(),
            Some("order status does not allow returns")
        );
    }

    #[test]
    fn availability_never_goes_negative() {
        assert_eq!(quantity_available(3, 0), 3);
        assert_eq!(quantity_available(3, 2), 1);
        assert_eq!(quantity_available(3, 3), 0);
        assert_eq!(quantity_available(3, 5), 0);
    }
}
