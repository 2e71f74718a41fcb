//! Per-response validation
//!
//! Checks a single answer against its question: required-empty, answer type,
//! numeric range, text pattern, selection cardinality, and evidence. All
//! violations are accumulated; nothing fails fast.

use fieldgate_core::{IssueCode, Question, QuestionType, Response, ValidationIssue};

/// Result of validating one response against its question.
#[derive(Debug, Clone)]
pub struct ResponseCheck {
    pub is_valid: bool,
    pub errors: Vec<ValidationIssue>,
}

impl ResponseCheck {
    fn from_errors(errors: Vec<ValidationIssue>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// Validate a single response against its question.
///
/// A `None` response stands for "no answer recorded".
pub fn validate_response(question: &Question, response: Option<&Response>) -> ResponseCheck {
    let mut errors = Vec::new();

    let answered = response.map(Response::is_answered).unwrap_or(false);

    if question.required && !answered {
        errors.push(ValidationIssue::for_question(
            IssueCode::MissingRequired,
            &question.id,
            format!("'{}' requires an answer", question.question),
        ));
    }

    if let Some(value) = response
        .filter(|r| r.is_answered())
        .and_then(|r| r.value.as_ref())
    {
        match question.question_type {
            QuestionType::Boolean => {
                if !matches!(value, fieldgate_core::ResponseValue::Bool(_)) {
                    errors.push(ValidationIssue::for_question(
                        IssueCode::InvalidValue,
                        &question.id,
                        "expected a yes/no answer",
                    ));
                }
            }
            QuestionType::Number | QuestionType::Rating => match value.as_number() {
                Some(number) => check_range(question, number, &mut errors),
                None => errors.push(ValidationIssue::for_question(
                    IssueCode::InvalidValue,
                    &question.id,
                    "expected a numeric answer",
                )),
            },
            QuestionType::Text => match value.as_text() {
                Some(text) => check_pattern(question, text, &mut errors),
                None => errors.push(ValidationIssue::for_question(
                    IssueCode::InvalidValue,
                    &question.id,
                    "expected a text answer",
                )),
            },
            QuestionType::Multiselect => match value.as_selections() {
                Some(selections) => check_selection_count(question, selections.len(), &mut errors),
                None => errors.push(ValidationIssue::for_question(
                    IssueCode::InvalidValue,
                    &question.id,
                    "expected a list of selections",
                )),
            },
        }
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

    ResponseCheck::from_errors(errors)
}

fn check_range(question: &Question, number: f64, errors: &mut Vec<ValidationIssue>) {
    let Some(rules) = &question.validation else {
        return;
    };
    if let Some(min) = rules.min {
        if number < min {
            errors.push(ValidationIssue::for_question(
                IssueCode::OutOfRange,
                &question.id,
                format!("value {} is below the minimum of {}", number, min),
            ));
        }
    }
    if let Some(max) = rules.max {
        if number > max {
            errors.push(ValidationIssue::for_question(
                IssueCode::OutOfRange,
                &question.id,
                format!("value {} is above the maximum of {}", number, max),
            ));
        }
    }
}

fn check_pattern(question: &Question, text: &str, errors: &mut Vec<ValidationIssue>) {
    let Some(pattern) = question.validation.as_ref().and_then(|r| r.pattern.as_ref()) else {
        return;
    };
    match regex::Regex::new(pattern) {
        Ok(re) => {
            if !re.is_match(text) {
                errors.push(ValidationIssue::for_question(
                    IssueCode::PatternMismatch,
                    &question.id,
                    format!("answer does not match the expected format ({})", pattern),
                ));
            }
        }
        // A broken pattern is a checklist-authoring bug; report it against
        // the question instead of silently passing the answer.
        Err(_) => errors.push(ValidationIssue::for_question(
            IssueCode::PatternMismatch,
            &question.id,
            format!("question has an invalid validation pattern ({})", pattern),
        )),
    }
}

fn check_selection_count(question: &Question, count: usize, errors: &mut Vec<ValidationIssue>) {
    let Some(rules) = &question.validation else {
        return;
    };
    if let Some(min) = rules.min_selections {
        if count < min {
            errors.push(ValidationIssue::for_question(
                IssueCode::SelectionCount,
                &question.id,
                format!("expected at least {} selections, got {}", min, count),
            ));
        }
    }
    if let Some(max) = rules.max_selections {
        if count > max {
            errors.push(ValidationIssue::for_question(
                IssueCode::SelectionCount,
                &question.id,
                format!("expected at most {} selections, got {}", max, count),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldgate_core::{ResponseValue, ValidationRules};

    #[test]
    fn test_required_unanswered() {
        let question = Question::new("q1", "Serial number?", QuestionType::Text).required();
        let check = validate_response(&question, None);

        assert!(!check.is_valid);
        assert_eq!(check.errors[0].code, IssueCode::MissingRequired);
        assert_eq!(check.errors[0].question_id.as_deref(), Some("q1"));
    }

    #[test]
    fn test_required_empty_string() {
        let question = Question::new("q1", "Serial number?", QuestionType::Text).required();
        let response = Response::answered("q1", ResponseValue::text(""));
        let check = validate_response(&question, Some(&response));

        assert!(!check.is_valid);
        assert_eq!(check.errors[0].code, IssueCode::MissingRequired);
    }

    #[test]
    fn test_optional_unanswered_is_valid() {
        let question = Question::new("q1", "Comments?", QuestionType::Text);
        let check = validate_response(&question, None);
        assert!(check.is_valid);
    }

    #[test]
    fn test_numeric_range() {
        let question = Question::new("q1", "Voltage?", QuestionType::Number)
            .with_validation(ValidationRules::range(200.0, 260.0));

        let ok = Response::answered("q1", ResponseValue::Number(230.0));
        assert!(validate_response(&question, Some(&ok)).is_valid);

        let low = Response::answered("q1", ResponseValue::Number(110.0));
        let check = validate_response(&question, Some(&low));
        assert_eq!(check.errors[0].code, IssueCode::OutOfRange);

        let high = Response::answered("q1", ResponseValue::Number(400.0));
        let check = validate_response(&question, Some(&high));
        assert_eq!(check.errors[0].code, IssueCode::OutOfRange);
    }

    #[test]
    fn test_zero_passes_required_but_checks_range() {
        let question = Question::new("q1", "Defect count?", QuestionType::Number)
            .required()
            .with_validation(ValidationRules::range(0.0, 50.0));
        let response = Response::answered("q1", ResponseValue::Number(0.0));
        let check = validate_response(&question, Some(&response));

        assert!(check.is_valid);
    }

    #[test]
    fn test_text_pattern() {
        let question = Question::new("q1", "Panel serial?", QuestionType::Text)
            .with_validation(ValidationRules::pattern(r"^SP-\d{6}$"));

        let ok = Response::answered("q1", ResponseValue::text("SP-123456"));
        assert!(validate_response(&question, Some(&ok)).is_valid);

        let bad = Response::answered("q1", ResponseValue::text("123456"));
        let check = validate_response(&question, Some(&bad));
        assert_eq!(check.errors[0].code, IssueCode::PatternMismatch);
    }

    #[test]
    fn test_invalid_pattern_reported() {
        let question = Question::new("q1", "Serial?", QuestionType::Text)
            .with_validation(ValidationRules::pattern("["));
        let response = Response::answered("q1", ResponseValue::text("anything"));
        let check = validate_response(&question, Some(&response));

        assert!(!check.is_valid);
        assert_eq!(check.errors[0].code, IssueCode::PatternMismatch);
    }

    #[test]
    fn test_selection_cardinality() {
        let question = Question::new("q1", "Observed defects?", QuestionType::Multiselect)
            .with_validation(ValidationRules::selections(1, 3));

        let none = Response::answered("q1", ResponseValue::Selections(vec![]));
        let check = validate_response(&question, Some(&none));
        assert_eq!(check.errors[0].code, IssueCode::SelectionCount);

        let many = Response::answered(
            "q1",
            ResponseValue::Selections(
                ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect(),
            ),
        );
        let check = validate_response(&question, Some(&many));
        assert_eq!(check.errors[0].code, IssueCode::SelectionCount);
    }

    #[test]
    fn test_wrong_type() {
        let question = Question::new("q1", "Secured?", QuestionType::Boolean);
        let response = Response::answered("q1", ResponseValue::text("yes"));
        let check = validate_response(&question, Some(&response));

        assert_eq!(check.errors[0].code, IssueCode::InvalidValue);
    }

    #[test]
    fn test_evidence_required_with_answer_but_no_media() {
        let question = Question::new("q2", "Mounting torque ok?", QuestionType::Text)
            .evidence_required();
        let response = Response::answered("q2", ResponseValue::text("ok"));
        let check = validate_response(&question, Some(&response));

        assert!(!check.is_valid);
        assert_eq!(check.errors[0].code, IssueCode::MissingEvidence);
        assert_eq!(check.errors[0].question_id.as_deref(), Some("q2"));
    }

    #[test]
    fn test_evidence_present() {
        let question = Question::new("q2", "Mounting torque ok?", QuestionType::Text)
            .evidence_required();
        let response = Response::answered("q2", ResponseValue::text("ok"))
            .with_evidence(vec!["ev-1".to_string()]);
        assert!(validate_response(&question, Some(&response)).is_valid);
    }

    #[test]
    fn test_multiple_violations_accumulate() {
        let question = Question::new("q1", "Voltage?", QuestionType::Number)
            .evidence_required()
            .with_validation(ValidationRules::range(200.0, 260.0));
        let response = Response::answered("q1", ResponseValue::Number(100.0));
        let check = validate_response(&question, Some(&response));

        assert_eq!(check.errors.len(), 2);
    }
}
