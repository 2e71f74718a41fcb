//! Machine-addressable validation issues
//!
//! Every validation failure names the offending question (when there is one)
//! so a UI can highlight the exact field, not just print free text.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// What kind of rule was violated
    pub code: IssueCode,

    /// Question the issue applies to, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question_id: Option<String>,

    /// Human-readable description
    pub message: String,
}

impl ValidationIssue {
    /// Create an issue with no question attached (transition-level failures)
    pub fn new(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            code,
            question_id: None,
            message: message.into(),
        }
    }

    /// Create an issue pinned to a specific question
    pub fn for_question(
        code: IssueCode,
        question_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code,
            question_id: Some(question_id.into()),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.question_id {
            Some(qid) => write!(f, "[{}] {}: {}", self.code, qid, self.message),
            None => write!(f, "[{}] {}", self.code, self.message),
        }
    }
}

/// Classification of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    /// Required question has no answer
    MissingRequired,
    /// Evidence-required question has no evidence references
    MissingEvidence,
    /// Numeric answer outside min/max bounds
    OutOfRange,
    /// Text answer does not match the configured pattern
    PatternMismatch,
    /// Multiselect answer outside selection-count bounds
    SelectionCount,
    /// Answer type does not fit the question type
    InvalidValue,
    /// Requested transition is not in the allowed table
    IllegalTransition,
    /// Rejection threshold reached; must go through the escalation path
    EscalationRequired,
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            IssueCode::MissingRequired => "missing_required",
            IssueCode::MissingEvidence => "missing_evidence",
            IssueCode::OutOfRange => "out_of_range",
            IssueCode::PatternMismatch => "pattern_mismatch",
            IssueCode::SelectionCount => "selection_count",
            IssueCode::InvalidValue => "invalid_value",
            IssueCode::IllegalTransition => "illegal_transition",
            IssueCode::EscalationRequired => "escalation_required",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_display() {
        let issue = ValidationIssue::for_question(
            IssueCode::MissingRequired,
            "q1",
            "question is required",
        );
        assert_eq!(format!("{}", issue), "[missing_required] q1: question is required");
    }

    #[test]
    fn test_issue_without_question() {
        let issue = ValidationIssue::new(IssueCode::IllegalTransition, "DRAFT -> APPROVED");
        assert!(issue.question_id.is_none());
        assert!(format!("{}", issue).contains("illegal_transition"));
    }

    #[test]
    fn test_issue_serialization_skips_empty_question() {
        let issue = ValidationIssue::new(IssueCode::EscalationRequired, "threshold reached");
        let json = serde_json::to_string(&issue).unwrap();
        assert!(!json.contains("question_id"));
        assert!(json.contains("escalation_required"));
    }
}
