//! Progress percentage and next-action guidance

use serde::Serialize;

use fieldgate_checklist::visible_questions;
use fieldgate_core::{Checklist, Inspection, InspectionStatus, Response};

/// Percentage of visible questions answered, 0..=100.
///
/// Hidden questions are excluded from the denominator, so the value reaches
/// 100 exactly when every visible question is answered and stays there under
/// re-evaluation with the same input. Returns 0 when nothing is visible.
pub fn calculate_progress(inspection: &Inspection, checklist: &Checklist) -> u8 {
    let visible = visible_questions(&checklist.questions, &inspection.responses);
    if visible.is_empty() {
        return 0;
    }

    let answered = visible
        .iter()
        .filter(|q| {
            inspection
                .response_for(&q.id)
                .map(Response::is_answered)
                .unwrap_or(false)
        })
        .count();

    ((answered as f64 / visible.len() as f64) * 100.0).round() as u8
}

/// UI guidance for the current status. Not correctness-bearing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NextAction {
    pub action: &'static str,
    pub description: &'static str,
}

/// Fixed status → guidance mapping.
pub fn next_action(status: InspectionStatus) -> NextAction {
    match status {
        InspectionStatus::Draft => NextAction {
            action: "complete_and_submit",
            description: "Complete the checklist and submit for review",
        },
        InspectionStatus::Pending => NextAction {
            action: "begin_review",
            description: "Waiting for a manager to begin review",
        },
        InspectionStatus::InReview => NextAction {
            action: "decide",
            description: "Reviewer must approve or reject the inspection",
        },
        InspectionStatus::Approved => NextAction {
            action: "none",
            description: "Inspection is complete",
        },
        InspectionStatus::Rejected => NextAction {
            action: "revise_and_resubmit",
            description: "Address the review feedback and resubmit",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldgate_core::{
        ConditionOperator, Question, QuestionCondition, QuestionType, ResponseValue,
    };

    fn checklist() -> Checklist {
        Checklist::new("cl-1")
            .with_question(Question::new("q1", "A?", QuestionType::Boolean).required())
            .with_question(Question::new("q2", "B?", QuestionType::Text))
    }

    #[test]
    fn test_progress_empty_checklist_is_zero() {
        let inspection = Inspection::new("proj-1", "cl-0", "inspector-1");
        assert_eq!(calculate_progress(&inspection, &Checklist::new("cl-0")), 0);
    }

    #[test]
    fn test_progress_is_monotonic() {
        let checklist = checklist();
        let mut inspection = Inspection::new("proj-1", "cl-1", "inspector-1");

        let p0 = calculate_progress(&inspection, &checklist);
        assert_eq!(p0, 0);

        inspection.record_response(Response::answered("q1", ResponseValue::Bool(true)));
        let p1 = calculate_progress(&inspection, &checklist);
        assert_eq!(p1, 50);
        assert!(p1 >= p0);

        inspection.record_response(Response::answered("q2", ResponseValue::text("ok")));
        let p2 = calculate_progress(&inspection, &checklist);
        assert_eq!(p2, 100);
        assert!(p2 >= p1);

        // stable under re-evaluation
        assert_eq!(calculate_progress(&inspection, &checklist), 100);
    }

    #[test]
    fn test_progress_ignores_hidden_questions() {
        let checklist = Checklist::new("cl-1")
            .with_question(Question::new("q1", "Damage?", QuestionType::Boolean))
            .with_question(
                Question::new("q2", "Describe", QuestionType::Text).with_condition(
                    QuestionCondition::new(
                        "q1",
                        ConditionOperator::Equals,
                        ResponseValue::Bool(true),
                    ),
                ),
            );

        let mut inspection = Inspection::new("proj-1", "cl-1", "inspector-1");
        inspection.record_response(Response::answered("q1", ResponseValue::Bool(false)));

        // q2 hidden, everything visible is answered
        assert_eq!(calculate_progress(&inspection, &checklist), 100);
    }

    #[test]
    fn test_empty_string_does_not_count() {
        let checklist = checklist();
        let mut inspection = Inspection::new("proj-1", "cl-1", "inspector-1");
        inspection.record_response(Response::answered("q2", ResponseValue::text("")));

        assert_eq!(calculate_progress(&inspection, &checklist), 0);
    }

    #[test]
    fn test_next_action_mapping() {
        assert_eq!(next_action(InspectionStatus::Draft).action, "complete_and_submit");
        assert_eq!(next_action(InspectionStatus::Pending).action, "begin_review");
        assert_eq!(next_action(InspectionStatus::InReview).action, "decide");
        assert_eq!(next_action(InspectionStatus::Approved).action, "none");
        assert_eq!(
            next_action(InspectionStatus::Rejected).action,
            "revise_and_resubmit"
        );
    }
}
