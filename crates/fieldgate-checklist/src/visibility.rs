//! Conditional question visibility
//!
//! A question with conditions is visible only while every condition holds
//! against the current responses. Hidden questions are excluded from
//! required/evidence checks and from completion percentages.

use std::collections::HashMap;

use fieldgate_core::{ConditionOperator, Question, QuestionCondition, Response, ResponseValue};

/// Whether a single condition holds against the current responses.
///
/// An unanswered controlling question fails every operator: the dependent
/// question stays hidden until the controlling one is answered.
pub fn condition_holds(
    condition: &QuestionCondition,
    responses: &HashMap<String, Response>,
) -> bool {
    let value = match responses
        .get(&condition.question_id)
        .filter(|r| r.is_answered())
        .and_then(|r| r.value.as_ref())
    {
        Some(value) => value,
        None => return false,
    };

    match condition.operator {
        ConditionOperator::Equals => value.loosely_equals(&condition.value),
        ConditionOperator::NotEquals => !value.loosely_equals(&condition.value),
        ConditionOperator::GreaterThan => match (value.as_number(), condition.value.as_number()) {
            (Some(a), Some(b)) => a > b,
            _ => false,
        },
        ConditionOperator::LessThan => match (value.as_number(), condition.value.as_number()) {
            (Some(a), Some(b)) => a < b,
            _ => false,
        },
        ConditionOperator::Contains => contains(value, &condition.value),
    }
}

/// Array membership for multiselect answers, case-insensitive substring for
/// text answers.
fn contains(value: &ResponseValue, needle: &ResponseValue) -> bool {
    let needle = match needle.as_text() {
        Some(text) => text,
        None => return false,
    };
    match value {
        ResponseValue::Selections(items) => items.iter().any(|item| item == needle),
        ResponseValue::Text(text) => text.to_lowercase().contains(&needle.to_lowercase()),
        _ => false,
    }
}

/// True if the question has no conditions, or every condition holds.
pub fn is_visible(question: &Question, responses: &HashMap<String, Response>) -> bool {
    question
        .conditions
        .iter()
        .all(|condition| condition_holds(condition, responses))
}

/// The visible subset of a question list, in checklist order.
pub fn visible_questions<'a>(
    questions: &'a [Question],
    responses: &HashMap<String, Response>,
) -> Vec<&'a Question> {
    questions
        .iter()
        .filter(|q| is_visible(q, responses))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldgate_core::QuestionType;

    fn respond(entries: Vec<(&str, ResponseValue)>) -> HashMap<String, Response> {
        entries
            .into_iter()
            .map(|(id, value)| (id.to_string(), Response::answered(id, value)))
            .collect()
    }

    #[test]
    fn test_no_conditions_always_visible() {
        let question = Question::new("q1", "A?", QuestionType::Text);
        assert!(is_visible(&question, &HashMap::new()));
    }

    #[test]
    fn test_equals_condition() {
        let condition =
            QuestionCondition::new("q1", ConditionOperator::Equals, ResponseValue::Bool(true));

        assert!(condition_holds(
            &condition,
            &respond(vec![("q1", ResponseValue::Bool(true))])
        ));
        assert!(!condition_holds(
            &condition,
            &respond(vec![("q1", ResponseValue::Bool(false))])
        ));
    }

    #[test]
    fn test_unanswered_controller_hides_question() {
        let condition =
            QuestionCondition::new("q1", ConditionOperator::NotEquals, ResponseValue::Bool(true));
        // q1 has no response at all; even not_equals does not fire
        assert!(!condition_holds(&condition, &HashMap::new()));

        // empty string counts as unanswered
        assert!(!condition_holds(
            &condition,
            &respond(vec![("q1", ResponseValue::text(""))])
        ));
    }

    #[test]
    fn test_numeric_comparisons() {
        let gt = QuestionCondition::new(
            "q1",
            ConditionOperator::GreaterThan,
            ResponseValue::Number(10.0),
        );
        let lt = QuestionCondition::new(
            "q1",
            ConditionOperator::LessThan,
            ResponseValue::Number(10.0),
        );

        let above = respond(vec![("q1", ResponseValue::Number(12.0))]);
        let below = respond(vec![("q1", ResponseValue::Number(7.0))]);

        assert!(condition_holds(&gt, &above));
        assert!(!condition_holds(&gt, &below));
        assert!(condition_holds(&lt, &below));
        assert!(!condition_holds(&lt, &above));
    }

    #[test]
    fn test_numeric_coercion_from_text() {
        let gt = QuestionCondition::new(
            "q1",
            ConditionOperator::GreaterThan,
            ResponseValue::Number(10.0),
        );
        assert!(condition_holds(
            &gt,
            &respond(vec![("q1", ResponseValue::text("11"))])
        ));
        // non-numeric text never compares
        assert!(!condition_holds(
            &gt,
            &respond(vec![("q1", ResponseValue::text("lots"))])
        ));
    }

    #[test]
    fn test_contains_membership_and_substring() {
        let condition = QuestionCondition::new(
            "q1",
            ConditionOperator::Contains,
            ResponseValue::text("cracked"),
        );

        assert!(condition_holds(
            &condition,
            &respond(vec![(
                "q1",
                ResponseValue::Selections(vec!["cracked".to_string(), "loose".to_string()])
            )])
        ));
        assert!(condition_holds(
            &condition,
            &respond(vec![("q1", ResponseValue::text("Two Cracked cells"))])
        ));
        assert!(!condition_holds(
            &condition,
            &respond(vec![("q1", ResponseValue::text("all intact"))])
        ));
    }

    #[test]
    fn test_all_conditions_must_hold() {
        let question = Question::new("q3", "Details?", QuestionType::Text)
            .with_condition(QuestionCondition::new(
                "q1",
                ConditionOperator::Equals,
                ResponseValue::Bool(true),
            ))
            .with_condition(QuestionCondition::new(
                "q2",
                ConditionOperator::GreaterThan,
                ResponseValue::Number(5.0),
            ));

        let both = respond(vec![
            ("q1", ResponseValue::Bool(true)),
            ("q2", ResponseValue::Number(6.0)),
        ]);
        let one = respond(vec![
            ("q1", ResponseValue::Bool(true)),
            ("q2", ResponseValue::Number(3.0)),
        ]);

        assert!(is_visible(&question, &both));
        assert!(!is_visible(&question, &one));
    }

    #[test]
    fn test_visible_questions_preserves_order() {
        let questions = vec![
            Question::new("q1", "A?", QuestionType::Boolean),
            Question::new("q2", "B?", QuestionType::Text).with_condition(
                QuestionCondition::new("q1", ConditionOperator::Equals, ResponseValue::Bool(true)),
            ),
            Question::new("q3", "C?", QuestionType::Number),
        ];

        let visible = visible_questions(&questions, &HashMap::new());
        let ids: Vec<&str> = visible.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["q1", "q3"]);
    }
}
