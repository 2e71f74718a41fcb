//! Unified Error Model
//!
//! Business-rule violations never travel through this enum; they are
//! returned as [`crate::ValidationIssue`] lists so a caller can surface every
//! problem at once. `WorkflowError` covers the failures that abort an
//! operation outright.
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkflowError {
    /// Transition or checklist rules were not met.
    #[error("VALIDATION/{0}")]
    Validation(String),

    /// Actor is not allowed to perform the requested transition.
    #[error("AUTH/{0}")]
    Authorization(String),

    /// Referenced inspection, checklist, or escalation does not exist.
    #[error("NOT_FOUND/{0}")]
    NotFound(String),

    /// Second active escalation for an inspection, or a stale-read commit.
    #[error("CONFLICT/{0}")]
    Conflict(String),

    /// The rejection committed but the escalation side-effect failed.
    #[error("ESCALATION/{0}")]
    EscalationCreation(String),

    /// Record store unreachable or misbehaving.
    #[error("STORE/{0}")]
    Store(String),
}

impl WorkflowError {
    /// Whether a caller can recover by re-fetching and retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            WorkflowError::Conflict(_) | WorkflowError::EscalationCreation(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_prefixes() {
        assert_eq!(
            WorkflowError::Validation("missing q1".into()).to_string(),
            "VALIDATION/missing q1"
        );
        assert_eq!(
            WorkflowError::Conflict("active escalation exists".into()).to_string(),
            "CONFLICT/active escalation exists"
        );
    }

    #[test]
    fn test_retryable() {
        assert!(WorkflowError::Conflict("stale".into()).is_retryable());
        assert!(WorkflowError::EscalationCreation("dup".into()).is_retryable());
        assert!(!WorkflowError::NotFound("insp-1".into()).is_retryable());
    }
}
