//! Transition table and transition validation
//!
//! The table is the single source of truth for legal edges; everything else
//! layers business rules (checklist completeness, rejection threshold) on
//! top of a table hit.

use serde::Serialize;

use fieldgate_core::{
    Checklist, Inspection, InspectionStatus, IssueCode, ValidationIssue, WorkflowConfig,
};

use fieldgate_checklist::validate_submission;

/// Legal transitions between inspection states.
///
/// ```text
/// DRAFT     → PENDING
/// PENDING   → IN_REVIEW | DRAFT
/// IN_REVIEW → APPROVED | REJECTED | PENDING
/// APPROVED  → (none)
/// REJECTED  → PENDING | DRAFT
/// ```
pub fn can_transition(from: InspectionStatus, to: InspectionStatus) -> bool {
    use InspectionStatus::*;

    matches!(
        (from, to),
        (Draft, Pending)
            | (Pending, InReview)
            | (Pending, Draft)
            | (InReview, Approved)
            | (InReview, Rejected)
            | (InReview, Pending)
            | (Rejected, Pending)
            | (Rejected, Draft)
    )
}

/// Result of validating a requested transition.
#[derive(Debug, Clone, Serialize)]
pub struct TransitionCheck {
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
}

impl TransitionCheck {
    fn from_errors(errors: Vec<ValidationIssue>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// Validate a requested transition for an inspection.
///
/// Table membership is checked first. A transition to PENDING additionally
/// requires the checklist to be submittable; a transition to REJECTED is
/// refused with an explicit error once the rejection threshold is reached:
/// callers must route such rejections through the escalation path.
pub fn validate_transition(
    inspection: &Inspection,
    checklist: &Checklist,
    to: InspectionStatus,
    config: &WorkflowConfig,
) -> TransitionCheck {
    let from = inspection.status;

    if !can_transition(from, to) {
        let check = TransitionCheck::from_errors(vec![ValidationIssue::new(
            IssueCode::IllegalTransition,
            format!("cannot move inspection from {} to {}", from, to),
        )]);
        tracing::debug!(
            inspection_id = %inspection.id,
            %from,
            %to,
            "Transition refused: not in table"
        );
        return check;
    }

    let mut errors = Vec::new();

    match to {
        InspectionStatus::Pending => {
            let submission = validate_submission(checklist, &inspection.responses);
            errors.extend(submission.errors);
        }
        InspectionStatus::Rejected => {
            if requires_escalation(inspection, config) {
                errors.push(ValidationIssue::new(
                    IssueCode::EscalationRequired,
                    format!(
                        "inspection has been rejected {} times; further rejections must escalate",
                        inspection.rejection_count
                    ),
                ));
            }
        }
        // IN_REVIEW-from-PENDING and APPROVED-from-IN_REVIEW are fully
        // covered by the table; no extra rules.
        _ => {}
    }

    tracing::debug!(
        inspection_id = %inspection.id,
        %from,
        %to,
        error_count = errors.len(),
        "Transition validated"
    );

    TransitionCheck::from_errors(errors)
}

/// Whether the rejection threshold has been reached.
pub fn requires_escalation(inspection: &Inspection, config: &WorkflowConfig) -> bool {
    inspection.rejection_count >= config.max_rejections
}
