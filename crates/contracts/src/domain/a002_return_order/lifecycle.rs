use crate::enums::ReturnStatus;
use serde::{Deserialize, Serialize};

/// Lifecycle event on a return order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReturnEvent {
    Approve,
    Reject,
    MarkInTransit,
    ReceivePackage,
    BeginInspection,
    CompleteInspection,
    ShelveRestock,
    CalculateRefund,
    IssueFullRefund,
    IssuePartialRefund,
    Close,
    Cancel,
}

impl ReturnEvent {
    /// Wire code of the event, also used in the audit log
    pub fn code(&self) -> &'static str {
        match self {
            ReturnEvent::Approve => "APPROVE",
            ReturnEvent::Reject => "REJECT",
            ReturnEvent::MarkInTransit => "MARK_IN_TRANSIT",
            ReturnEvent::ReceivePackage => "RECEIVE_PACKAGE",
            ReturnEvent::BeginInspection => "BEGIN_INSPECTION",
            ReturnEvent::CompleteInspection => "COMPLETE_INSPECTION",
            ReturnEvent::ShelveRestock => "SHELVE_RESTOCK",
            ReturnEvent::CalculateRefund => "CALCULATE_REFUND",
            ReturnEvent::IssueFullRefund => "ISSUE_FULL_REFUND",
            ReturnEvent::IssuePartialRefund => "ISSUE_PARTIAL_REFUND",
            ReturnEvent::Close => "CLOSE",
            ReturnEvent::Cancel => "CANCEL",
        }
    }

    /// Verb phrase used in error messages
    pub fn display_name(&self) -> &'static str {
        match self {
            ReturnEvent::Approve => "approve",
            ReturnEvent::Reject => "reject",
            ReturnEvent::MarkInTransit => "mark in transit",
            ReturnEvent::ReceivePackage => "receive",
            ReturnEvent::BeginInspection => "begin inspecting",
            ReturnEvent::CompleteInspection => "complete inspection of",
            ReturnEvent::ShelveRestock => "restock",
            ReturnEvent::CalculateRefund => "calculate a refund for",
            ReturnEvent::IssueFullRefund => "refund",
            ReturnEvent::IssuePartialRefund => "partially refund",
            ReturnEvent::Close => "close",
            ReturnEvent::Cancel => "cancel",
        }
    }

    /// All events
    pub fn all() -> Vec<ReturnEvent> {
        vec![
            ReturnEvent::Approve,
            ReturnEvent::Reject,
            ReturnEvent::MarkInTransit,
            ReturnEvent::ReceivePackage,
            ReturnEvent::BeginInspection,
            ReturnEvent::CompleteInspection,
            ReturnEvent::ShelveRestock,
            ReturnEvent::CalculateRefund,
            ReturnEvent::IssueFullRefund,
            ReturnEvent::IssuePartialRefund,
            ReturnEvent::Close,
            ReturnEvent::Cancel,
        ]
    }
}

impl ToString for ReturnEvent {
    fn to_string(&self) -> String {
        self.code().to_string()
    }
}

/// One row of the append-only audit trail of a return order.
///
/// `event` holds the lifecycle event code, or "CREATE" for the row
/// written when the return comes into existence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnEventRecord {
    pub id: String,
    #[serde(rename = "returnOrderId")]
    pub return_order_id: String,
    pub event: String,
    #[serde(rename = "fromStatus")]
    pub from_status: Option<String>,
    #[serde(rename = "toStatus")]
    pub to_status: String,
    /// Username of the staff member, or "system"
    pub actor: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// One row of the transition table
#[derive(Debug, Clone, Copy)]
pub struct Transition {
    pub event: ReturnEvent,
    pub allowed_from: &'static [ReturnStatus],
    pub to: ReturnStatus,
}

/// The whole lifecycle in one place.
///
/// Each event appears exactly once; an event fired from a status not in
/// its `allowed_from` list is rejected without touching state.
pub const TRANSITIONS: &[Transition] = &[
    Transition {
        event: ReturnEvent::Approve,
        allowed_from: &[ReturnStatus::Pending],
        to: ReturnStatus::Approved,
    },
    Transition {
        event: ReturnEvent::Reject,
        allowed_from: &[ReturnStatus::Pending],
        to: ReturnStatus::Rejected,
    },
    Transition {
        event: ReturnEvent::MarkInTransit,
        allowed_from: &[ReturnStatus::Approved],
        to: ReturnStatus::InTransit,
    },
    Transition {
        event: ReturnEvent::ReceivePackage,
        allowed_from: &[ReturnStatus::Approved, ReturnStatus::InTransit],
        to: ReturnStatus::Received,
    },
    Transition {
        event: ReturnEvent::BeginInspection,
        allowed_from: &[ReturnStatus::Received],
        to: ReturnStatus::Inspecting,
    },
    Transition {
        event: ReturnEvent::CompleteInspection,
        allowed_from: &[ReturnStatus::Inspecting],
        to: ReturnStatus::InspectionComplete,
    },
    Transition {
        event: ReturnEvent::ShelveRestock,
        allowed_from: &[ReturnStatus::InspectionComplete],
        to: ReturnStatus::Restocking,
    },
    Transition {
        event: ReturnEvent::CalculateRefund,
        allowed_from: &[ReturnStatus::InspectionComplete, ReturnStatus::Restocking],
        to: ReturnStatus::RefundPending,
    },
    Transition {
        event: ReturnEvent::IssueFullRefund,
        allowed_from: &[ReturnStatus::RefundPending],
        to: ReturnStatus::Refunded,
    },
    Transition {
        event: ReturnEvent::IssuePartialRefund,
        allowed_from: &[ReturnStatus::RefundPending],
        to: ReturnStatus::PartiallyRefunded,
    },
    Transition {
        event: ReturnEvent::Close,
        allowed_from: &[
            ReturnStatus::Refunded,
            ReturnStatus::PartiallyRefunded,
            ReturnStatus::Rejected,
        ],
        to: ReturnStatus::Closed,
    },
    Transition {
        event: ReturnEvent::Cancel,
        allowed_from: &[ReturnStatus::Pending, ReturnStatus::Approved],
        to: ReturnStatus::Cancelled,
    },
];

/// Attempted lifecycle event from a status that does not allow it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidTransition {
    pub current: ReturnStatus,
    pub event: ReturnEvent,
    pub allowed: &'static [ReturnStatus],
}

impl std::fmt::Display for InvalidTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let allowed = self
            .allowed
            .iter()
            .map(|s| s.code())
            .collect::<Vec<_>>()
            .join(" or ");
        write!(
            f,
            "Cannot {} return with status: {}. Must be {}.",
            self.event.display_name(),
            self.current.code(),
            allowed
        )
    }
}

impl std::error::Error for InvalidTransition {}

/// Destination status for `event` fired from `current`, or the reason
/// it is not allowed. Pure: the caller owns applying the result.
pub fn apply(current: ReturnStatus, event: ReturnEvent) -> Result<ReturnStatus, InvalidTransition> {
    for transition in TRANSITIONS {
        if transition.event == event {
            if transition.allowed_from.contains(&current) {
                return Ok(transition.to);
            }
            return Err(InvalidTransition {
                current,
                event,
                allowed: transition.allowed_from,
            });
        }
    }
    // Unreachable while TRANSITIONS covers every event; kept as a
    // rejection rather than a panic so a gap fails closed.
    Err(InvalidTransition {
        current,
        event,
        allowed: &[],
    })
}

/// Source statuses from which `event` may fire
pub fn allowed_sources(event: ReturnEvent) -> &'static [ReturnStatus] {
    TRANSITIONS
        .iter()
        .find(|t| t.event == event)
        .map(|t| t.allowed_from)
        .unwrap_or(&[])
}

/// True when no event leads out of `status` (CLOSED, CANCELLED).
/// REJECTED and the refunded statuses still accept Close for archival.
pub fn is_terminal(status: ReturnStatus) -> bool {
    !TRANSITIONS.iter().any(|t| t.allowed_from.contains(&status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_event_has_exactly_one_rule() {
        for event in ReturnEvent::all() {
            let rules = TRANSITIONS.iter().filter(|t| t.event == event).count();
            assert_eq!(rules, 1, "event {} must have one rule", event.code());
        }
        assert_eq!(TRANSITIONS.len(), ReturnEvent::all().len());
    }

    #[test]
    fn allowed_pairs_reach_their_destination() {
        for transition in TRANSITIONS {
            for &source in transition.allowed_from {
                assert_eq!(apply(source, transition.event), Ok(transition.to));
            }
        }
    }

    #[test]
    fn every_disallowed_pair_is_rejected_in_place() {
        for event in ReturnEvent::all() {
            let allowed = allowed_sources(event);
            for status in ReturnStatus::all() {
                if allowed.contains(&status) {
                    continue;
                }
                let err = apply(status, event).unwrap_err();
                assert_eq!(err.current, status);
                assert_eq!(err.event, event);
                assert_eq!(err.allowed, allowed);
            }
        }
    }

    #[test]
    fn receive_requires_approved_or_in_transit() {
        assert_eq!(
            apply(ReturnStatus::Approved, ReturnEvent::ReceivePackage),
            Ok(ReturnStatus::Received)
        );
        assert_eq!(
            apply(ReturnStatus::InTransit, ReturnEvent::ReceivePackage),
            Ok(ReturnStatus::Received)
        );
        let err = apply(ReturnStatus::Received, ReturnEvent::ReceivePackage).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot receive return with status: RECEIVED. Must be APPROVED or IN_TRANSIT."
        );
    }

    #[test]
    fn closed_and_cancelled_absorb() {
        for status in [ReturnStatus::Closed, ReturnStatus::Cancelled] {
            assert!(is_terminal(status));
            for event in ReturnEvent::all() {
                assert!(apply(status, event).is_err());
            }
        }
    }

    #[test]
    fn rejected_accepts_only_archival() {
        assert!(!is_terminal(ReturnStatus::Rejected));
        assert_eq!(
            apply(ReturnStatus::Rejected, ReturnEvent::Close),
            Ok(ReturnStatus::Closed)
        );
        for event in ReturnEvent::all() {
            if event != ReturnEvent::Close {
                assert!(apply(ReturnStatus::Rejected, event).is_err());
            }
        }
    }

    #[test]
    fn cancel_only_from_pending_or_approved() {
        assert_eq!(
            apply(ReturnStatus::Pending, ReturnEvent::Cancel),
            Ok(ReturnStatus::Cancelled)
        );
        assert_eq!(
            apply(ReturnStatus::Approved, ReturnEvent::Cancel),
            Ok(ReturnStatus::Cancelled)
        );
        assert!(apply(ReturnStatus::Received, ReturnEvent::Cancel).is_err());
        assert!(apply(ReturnStatus::Refunded, ReturnEvent::Cancel).is_err());
    }

    #[test]
    fn happy_path_runs_start_to_close() {
        let path = [
            ReturnEvent::Approve,
            ReturnEvent::MarkInTransit,
            ReturnEvent::ReceivePackage,
            ReturnEvent::BeginInspection,
            ReturnEvent::CompleteInspection,
            ReturnEvent::ShelveRestock,
            ReturnEvent::CalculateRefund,
            ReturnEvent::IssueFullRefund,
            ReturnEvent::Close,
        ];
        let mut status = ReturnStatus::Pending;
        for event in path {
            status = apply(status, event).unwrap();
        }
        assert_eq!(status, ReturnStatus::Closed);
    }
}
