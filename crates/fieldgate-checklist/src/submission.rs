//! Submission and whole-checklist validation
//!
//! `validate_submission` is the authoritative gate for DRAFT → PENDING:
//! every visible required question must be answered and every visible
//! evidence-required question must carry at least one evidence reference.
//! `validate_checklist` is the richer report used for progress and UI
//! guidance.

use std::collections::HashMap;

use fieldgate_core::{Checklist, IssueCode, Question, Response, ValidationIssue};

use crate::response::validate_response;
use crate::visibility::visible_questions;

/// Result of the submission gate. Aggregates every violation; never
/// fail-fast, so the UI can show the complete list at once.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SubmissionReport {
    pub valid: bool,
    pub errors: Vec<ValidationIssue>,
}

/// Validate that a set of responses is submittable against a checklist.
pub fn validate_submission(
    checklist: &Checklist,
    responses: &HashMap<String, Response>,
) -> SubmissionReport {
    let mut errors = Vec::new();

    for question in visible_questions(&checklist.questions, responses) {
        let response = responses.get(&question.id);
        let answered = response.map(Response::is_answered).unwrap_or(false);

        if question.required && !answered {
            errors.push(ValidationIssue::for_question(
                IssueCode::MissingRequired,
                &question.id,
                format!("'{}' requires an answer", question.question),
            ));
        }

        if question.evidence_required {
            let has_evidence = response.map(Response::has_evidence).unwrap_or(false);
            if !has_evidence {
                errors.push(ValidationIssue::for_question(
                    IssueCode::MissingEvidence,
                    &question.id,
                    format!("'{}' requires at least one evidence item", question.question),
                ));
            }
        }
    }

    SubmissionReport {
        valid: errors.is_empty(),
        errors,
    }
}

/// Full checklist report for progress and UI guidance.
///
/// Hidden questions are excluded from every list and from the completion
/// denominator. Unanswered *optional* boolean or evidence-bearing questions
/// surface as warnings, not errors.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ChecklistReport {
    pub is_complete: bool,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    pub missing_required: Vec<String>,
    pub missing_evidence: Vec<String>,
    /// Answered visible questions over total visible questions, 0..=100
    pub completion_rate: f64,
}

/// Evaluate the whole checklist, including per-answer value rules.
pub fn validate_checklist(
    questions: &[Question],
    responses: &HashMap<String, Response>,
) -> ChecklistReport {
    let visible = visible_questions(questions, responses);

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut missing_required = Vec::new();
    let mut missing_evidence = Vec::new();
    let mut answered_count = 0usize;

    for question in &visible {
        let response = responses.get(&question.id);
        let answered = response.map(Response::is_answered).unwrap_or(false);
        let has_evidence = response.map(Response::has_evidence).unwrap_or(false);

        if answered {
            answered_count += 1;
            // value-level rules only apply to recorded answers
            let check = validate_response(question, response);
            errors.extend(
                check
                    .errors
                    .into_iter()
                    .filter(|issue| issue.code != IssueCode::MissingEvidence),
            );
        } else if question.required {
            missing_required.push(question.id.clone());
            errors.push(ValidationIssue::for_question(
                IssueCode::MissingRequired,
                &question.id,
                format!("'{}' requires an answer", question.question),
            ));
        } else if matches!(
            question.question_type,
            fieldgate_core::QuestionType::Boolean
        ) || question.evidence_required
        {
            warnings.push(ValidationIssue::for_question(
                IssueCode::MissingRequired,
                &question.id,
                format!("'{}' has not been answered", question.question),
            ));
        }

        if question.evidence_required && !has_evidence {
            missing_evidence.push(question.id.clone());
            let issue = ValidationIssue::for_question(
                IssueCode::MissingEvidence,
                &question.id,
                format!("'{}' requires at least one evidence item", question.question),
            );
            if answered || question.required {
                errors.push(issue);
            } else {
                warnings.push(issue);
            }
        }
    }

    let completion_rate = if visible.is_empty() {
        0.0
    } else {
        (answered_count as f64 / visible.len() as f64) * 100.0
    };

    ChecklistReport {
        is_complete: errors.is_empty(),
        errors,
        warnings,
        missing_required,
        missing_evidence,
        completion_rate,
    }
}

/// The next question an inspector should look at: the first unanswered
/// visible required question, else the first unanswered visible optional
/// question, else `None`.
pub fn next_recommended_question<'a>(
    questions: &'a [Question],
    responses: &HashMap<String, Response>,
) -> Option<&'a Question> {
    let visible = visible_questions(questions, responses);

    let unanswered = |q: &&&Question| {
        !responses
            .get(&q.id)
            .map(Response::is_answered)
            .unwrap_or(false)
    };

    visible
        .iter()
        .filter(|q| q.required)
        .find(unanswered)
        .or_else(|| visible.iter().filter(|q| !q.required).find(unanswered))
        .copied()
}
