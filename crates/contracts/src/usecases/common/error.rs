use crate::domain::a002_return_order::InvalidTransition;
use thiserror::Error;

/// Recoverable failures of the returns workflow.
///
/// Every variant is an expected outcome of a well-formed API call, not
/// an infrastructure fault: the order mutates nothing and reports a
/// stable code plus a customer-presentable message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WorkflowError {
    /// Order number and e-mail did not match together. The message
    /// deliberately does not say which half was wrong.
    #[error("No order found matching that order number and email address")]
    OrderNotFound,

    #[error("Order is not eligible for return: {reason}")]
    Ineligible { reason: String },

    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),

    #[error("Cannot process refund: {} item(s) not yet inspected: {}", .missing.len(), .missing.join(", "))]
    IncompleteInspection { missing: Vec<String> },

    #[error("{message}")]
    Validation { message: String },

    #[error("{what} not found")]
    NotFound { what: String },
}

impl WorkflowError {
    /// Stable code used in API error bodies
    pub fn code(&self) -> &'static str {
        match self {
            WorkflowError::OrderNotFound => "ORDER_NOT_FOUND",
            WorkflowError::Ineligible { .. } => "INELIGIBLE_RETURN",
            WorkflowError::InvalidTransition(_) => "INVALID_TRANSITION",
            WorkflowError::IncompleteInspection { .. } => "INCOMPLETE_INSPECTION",
            WorkflowError::Validation { .. } => "VALIDATION_ERROR",
            WorkflowError::NotFound { .. } => "NOT_FOUND",
        }
    }

    pub fn ineligible(reason: impl Into<String>) -> Self {
        WorkflowError::Ineligible {
            reason: reason.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        WorkflowError::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        WorkflowError::NotFound { what: what.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_return_order::{apply, ReturnEvent};
    use crate::enums::ReturnStatus;

    #[test]
    fn codes_are_stable() {
        assert_eq!(WorkflowError::OrderNotFound.code(), "ORDER_NOT_FOUND");
        assert_eq!(
            WorkflowError::ineligible("return window expired").code(),
            "INELIGIBLE_RETURN"
        );
        assert_eq!(
            WorkflowError::validation("no items selected").code(),
            "VALIDATION_ERROR"
        );
    }

    #[test]
    fn transition_error_keeps_its_message() {
        let err = apply(ReturnStatus::Closed, ReturnEvent::Approve).unwrap_err();
        let wrapped: WorkflowError = err.into();
        assert_eq!(wrapped.code(), "INVALID_TRANSITION");
        assert_eq!(
            wrapped.to_string(),
            "Cannot approve return with status: CLOSED. Must be PENDING."
        );
    }

    #[test]
    fn incomplete_inspection_names_the_missing_lines() {
        let err = WorkflowError::IncompleteInspection {
            missing: vec!["SKU-A".to_string(), "SKU-B".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Cannot process refund: 2 item(s) not yet inspected: SKU-A, SKU-B"
        );
    }
}
